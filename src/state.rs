use crate::error::RotationError;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    NotStarted, // Nothing shown yet, the first advance keeps the index
    Started,    // Start element shown, no transition has moved it yet
    Running,    // At least one transition changed the visible element
}

/// Index bookkeeping of one rotation: which element is visible, which one the
/// scheduler moves to next, and how many automatic transitions ran since the
/// last `play`.
///
/// Holds no timers and talks to no renderer; [`Rotation`](crate::Rotation)
/// drives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationState {
    len: usize,
    current: Option<usize>,
    next: Option<usize>,
    loops: usize,
    playing: bool,
    phase: Phase,
}

impl RotationState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            current: None,
            next: None,
            loops: 0,
            playing: false,
            phase: Phase::NotStarted,
        }
    }

    /// State positioned on `start_index` but with nothing shown yet.
    ///
    /// A zero start leaves the next pointer unset so that the first `play`
    /// initialises it, the same way a rotation that was never moved does.
    pub fn starting_at(len: usize, start_index: usize) -> Self {
        let mut state = Self::new(len);
        if start_index != 0 {
            state.next = Some(start_index);
        }
        state
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub fn loops(&self) -> usize {
        self.loops
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn base(&self) -> usize {
        self.next.or(self.current).unwrap_or(0)
    }

    /// Move the next pointer one step according to the direction and playback.
    ///
    /// Forward only moves while playing; a stopped rotation keeps its pointer so
    /// a manual jump lands exactly where it was aimed. The very first call never
    /// moves, so the configured start element is shown as is.
    pub fn advance(&mut self, reverse: bool) -> usize {
        let base = self.base();
        if self.phase == Phase::NotStarted || self.len == 0 {
            self.phase = Phase::Started;
            return base;
        }
        let index = if reverse {
            (base + self.len - 1) % self.len
        } else if self.playing {
            (base + 1) % self.len
        } else {
            base
        };
        self.next = Some(index);
        index
    }

    /// One forward step regardless of playback.
    pub fn step_forward(&mut self) -> usize {
        if self.phase == Phase::NotStarted || self.len == 0 {
            return self.advance(false);
        }
        let index = (self.base() + 1) % self.len;
        self.next = Some(index);
        index
    }

    /// Aim at `custom` when given, then apply the policy step.
    ///
    /// An out of range target is rejected before any field changes.
    pub fn resolve_target(
        &mut self,
        custom: Option<usize>,
        reverse: bool,
    ) -> Result<usize, RotationError> {
        if let Some(index) = custom {
            if index >= self.len {
                return Err(RotationError::IndexOutOfRange {
                    index,
                    len: self.len,
                });
            }
            self.next = Some(index);
        }
        Ok(self.advance(reverse))
    }

    /// Record `index` as the visible element.
    pub fn set_current(&mut self, index: usize) {
        debug_assert!(index < self.len);
        if self.phase == Phase::Started && self.current.is_some_and(|current| current != index) {
            self.phase = Phase::Running;
        }
        self.current = Some(index);
    }

    /// Flip to playing. Returns `false` when already playing.
    pub fn start_playing(&mut self) -> bool {
        if self.playing {
            return false;
        }
        self.playing = true;
        if self.next.is_none() {
            self.next = Some(0);
        }
        true
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.loops = 0;
    }

    pub fn record_loop(&mut self) {
        self.loops += 1;
    }

    /// Whether a bounded rotation has used its budget and sits on the end element.
    pub fn cycle_exhausted(&self, budget: Option<usize>, end_index: usize) -> bool {
        match budget {
            Some(budget) if budget > 0 => self.loops >= budget && self.next == Some(end_index),
            _ => false,
        }
    }
}
