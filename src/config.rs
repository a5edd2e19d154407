use std::time::Duration;

use crate::constants::*;
use crate::error::RotationError;

/// Options controlling how and when elements are rotated.
///
/// Unset options keep the defaults from [`constants`](crate::constants):
/// five seconds between transitions, one second fades, autoplay on, start
/// at the first element and rotate forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationConfig {
    /// Time between automatic transitions
    pub delay: Duration,
    /// Duration of the fade passed to the renderer
    pub speed: Duration,
    /// Start rotating as soon as the rotation is built
    pub autoplay: bool,
    /// Element shown first
    pub start_index: usize,
    /// Full passes over all elements before stopping, 0 for unbounded
    pub cycle_count: usize,
    /// Element on which a bounded rotation is allowed to stop
    pub cycle_end_index: usize,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            speed: DEFAULT_SPEED,
            autoplay: DEFAULT_AUTOPLAY,
            start_index: DEFAULT_START_INDEX,
            cycle_count: DEFAULT_CYCLE_COUNT,
            cycle_end_index: DEFAULT_CYCLE_END_INDEX,
        }
    }
}

impl RotationConfig {
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn with_cycle_count(mut self, cycle_count: usize) -> Self {
        self.cycle_count = cycle_count;
        self
    }

    pub fn with_cycle_end_index(mut self, cycle_end_index: usize) -> Self {
        self.cycle_end_index = cycle_end_index;
        self
    }

    /// Total automatic transitions allowed before auto-stop, `None` when unbounded.
    pub fn loop_budget(&self, len: usize) -> Option<usize> {
        match self.cycle_count {
            0 => None,
            cycles => Some(cycles.saturating_mul(len)),
        }
    }

    /// Check the indices against the element count they will be used with.
    pub fn validate(&self, len: usize) -> Result<(), RotationError> {
        if self.start_index >= len {
            return Err(RotationError::InvalidConfig(format!(
                "start index {} out of range for {} elements",
                self.start_index, len
            )));
        }
        if self.cycle_end_index >= len {
            return Err(RotationError::InvalidConfig(format!(
                "cycle end index {} out of range for {} elements",
                self.cycle_end_index, len
            )));
        }
        Ok(())
    }
}
