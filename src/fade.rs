use std::time::Duration;

use crate::renderer::{FadeCompletion, Opacity};

/// A running opacity animation for one element.
///
/// Renderers keep one per fading element and call [`update`](Fade::update)
/// every frame; the completion token fires on the frame the fade ends.
#[derive(Debug)]
pub struct Fade {
    start: f32,
    end: f32,
    timer: Duration,
    duration: Duration,
    completion: Option<FadeCompletion>,
}

impl Fade {
    pub fn new(
        start: f32,
        target: Opacity,
        duration: Duration,
        completion: Option<FadeCompletion>,
    ) -> Self {
        Self {
            start,
            end: target.alpha(),
            timer: Duration::ZERO,
            duration,
            completion,
        }
    }

    pub fn target(&self) -> f32 {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.timer >= self.duration
    }

    pub fn alpha(&self) -> f32 {
        if self.duration.is_zero() {
            return self.end;
        }
        let t = (self.timer.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        self.start + (self.end - self.start) * t
    }

    /// Advance by `dt` and return the alpha for this frame.
    pub fn update(&mut self, dt: Duration) -> f32 {
        self.timer = (self.timer + dt).min(self.duration);
        if self.is_finished() {
            if let Some(completion) = self.completion.take() {
                completion.complete();
            }
        }
        self.alpha()
    }
}
