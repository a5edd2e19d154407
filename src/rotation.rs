use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::RotationConfig;
use crate::constants::MIN_ELEMENTS;
use crate::error::RotationError;
use crate::events::{EventKind, Handlers};
use crate::renderer::{Completed, FadeCompletion, Opacity, Renderer};
use crate::state::RotationState;
use crate::ticker::Ticker;

/// A slideshow over the elements of one renderer.
///
/// The rotation shows the configured start element, then (with autoplay)
/// swaps to the next element every `delay`, fading over `speed`. Time only
/// moves when the host calls [`update`](Rotation::update), usually once per
/// frame, so nothing runs behind the caller's back and dropping the rotation
/// cancels everything that was pending.
///
/// Fewer than two elements make an inert rotation: every operation returns
/// immediately and nothing is ever rendered.
///
/// ```
/// use std::time::Duration;
/// use rotator::{LogRenderer, Rotation, RotationConfig};
///
/// let renderer = LogRenderer::with_count(3);
/// let config = RotationConfig::default().with_delay(Duration::from_secs(1));
/// let mut rotation = Rotation::new(renderer, config).unwrap();
///
/// rotation.update(Duration::from_secs(1));
/// assert_eq!(rotation.index(), Some(1));
///
/// rotation.stop().jump(0).unwrap();
/// assert_eq!(rotation.index(), Some(0));
/// ```
pub struct Rotation<R: Renderer> {
    renderer: R,
    config: RotationConfig,
    state: RotationState,
    ticker: Ticker,
    reverse: bool,
    budget: Option<usize>,
    clock: Duration,
    epoch: u64,
    sender: Sender<Completed>,
    completions: Receiver<Completed>,
    handlers: Handlers<R>,
    dispatching: bool,
}

impl<R: Renderer> Rotation<R> {
    pub fn new(renderer: R, config: RotationConfig) -> Result<Self, RotationError> {
        let len = renderer.len();
        if len >= MIN_ELEMENTS {
            config.validate(len)?;
        }

        let (sender, completions) = mpsc::channel();
        let mut rotation = Self {
            renderer,
            state: RotationState::starting_at(len, config.start_index),
            budget: config.loop_budget(len),
            config,
            ticker: Ticker::new(),
            reverse: false,
            clock: Duration::ZERO,
            epoch: 0,
            sender,
            completions,
            handlers: Handlers::default(),
            dispatching: false,
        };

        if rotation.is_inert() {
            debug!(elements = len, "nothing to rotate");
            return Ok(rotation);
        }

        rotation.show_start();
        if rotation.config.autoplay {
            rotation.play(false);
        }
        Ok(rotation)
    }

    fn is_inert(&self) -> bool {
        self.state.len() < MIN_ELEMENTS
    }

    fn show_start(&mut self) {
        for index in 0..self.state.len() {
            self.renderer.hide(index);
        }
        let start = self.state.advance(false);
        self.renderer.show(start);
        self.state.set_current(start);
        debug!(start, elements = self.state.len(), "rotation shown");
    }

    pub fn stop(&mut self) -> &mut Self {
        if self.is_inert() {
            return self;
        }
        self.ticker.cancel();
        self.renderer.halt();
        // Fades halted here must not report a transition later.
        self.epoch += 1;
        if self.state.is_playing() {
            debug!(index = ?self.state.current(), "rotation stopped");
        }
        self.state.stop();
        self
    }

    /// Start autoplay. The visible element stays for one full `delay` before
    /// the first automatic transition.
    pub fn play(&mut self, reverse: bool) -> &mut Self {
        if self.is_inert() {
            return self;
        }
        if !self.state.start_playing() {
            trace!("already playing");
            return self;
        }
        self.reverse = reverse;
        self.ticker.start(self.clock, self.config.delay);
        debug!(reverse, delay = ?self.config.delay, "rotation playing");
        self
    }

    /// Stop autoplay and show the element at `index`.
    pub fn jump(&mut self, index: usize) -> Result<&mut Self, RotationError> {
        if self.is_inert() {
            return Ok(self);
        }
        if index >= self.state.len() {
            return Err(RotationError::IndexOutOfRange {
                index,
                len: self.state.len(),
            });
        }
        self.stop();
        self.transition(Some(index), false)?;
        self.flush();
        Ok(self)
    }

    /// Stop autoplay and show the following element.
    pub fn next(&mut self) -> &mut Self {
        if self.is_inert() {
            return self;
        }
        self.stop();
        let previous = self.state.current();
        let target = self.state.step_forward();
        self.swap(previous, target);
        self.flush();
        self
    }

    /// Stop autoplay and show the element before the next pointer.
    pub fn prev(&mut self) -> &mut Self {
        if self.is_inert() {
            return self;
        }
        self.stop();
        let previous = self.state.current();
        let target = self.state.advance(true);
        self.swap(previous, target);
        self.flush();
        self
    }

    /// Bind a handler by event name. Unknown names are ignored.
    pub fn bind<F>(&mut self, name: &str, handler: F) -> &mut Self
    where
        F: FnMut(&mut Rotation<R>, usize) + 'static,
    {
        match EventKind::from_name(name) {
            Some(kind) => self.on(kind, handler),
            None => {
                trace!(name, "ignoring unknown event");
                self
            }
        }
    }

    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> &mut Self
    where
        F: FnMut(&mut Rotation<R>, usize) + 'static,
    {
        if self.is_inert() {
            return self;
        }
        self.handlers.set(kind, Box::new(handler));
        self
    }

    /// Advance the clock by `dt`: animate the renderer, report finished
    /// transitions and run every autoplay tick that came due.
    pub fn update(&mut self, dt: Duration) -> &mut Self {
        self.clock += dt;
        if self.is_inert() {
            return self;
        }
        self.renderer.update(dt);
        self.flush();

        while self.ticker.poll(self.clock) {
            self.tick();
            self.flush();
            if self.ticker.period().is_zero() {
                break;
            }
        }
        self
    }

    fn tick(&mut self) {
        trace!(loops = self.state.loops(), next = ?self.state.next(), "autoplay tick");
        if self
            .state
            .cycle_exhausted(self.budget, self.config.cycle_end_index)
        {
            let last = self.state.current();
            self.stop();
            debug!(index = ?last, "cycle budget used up");
            if let Some(last) = last {
                self.fire(EventKind::CycleEnd, last);
            }
            return;
        }

        let previous = self.state.current();
        let target = self.state.advance(self.reverse);
        self.swap(previous, target);
        self.state.record_loop();
    }

    fn transition(&mut self, target: Option<usize>, reverse: bool) -> Result<(), RotationError> {
        let previous = self.state.current();
        let target = self.state.resolve_target(target, reverse)?;
        self.swap(previous, target);
        Ok(())
    }

    fn swap(&mut self, previous: Option<usize>, target: usize) {
        if previous == Some(target) {
            trace!(index = target, "already visible");
            return;
        }

        let speed = self.config.speed;
        self.renderer.raise(target);
        self.renderer.fade_to(target, Opacity::Opaque, speed, None);
        if let Some(previous) = previous {
            let completion = FadeCompletion::new(self.sender.clone(), self.epoch, previous);
            self.renderer.lower(previous);
            self.renderer
                .fade_to(previous, Opacity::Transparent, speed, Some(completion));
        }
        self.state.set_current(target);
        debug!(from = ?previous, to = target, "transition");
    }

    fn flush(&mut self) {
        if self.dispatching {
            return;
        }
        self.dispatching = true;
        while let Ok(done) = self.completions.try_recv() {
            if done.epoch != self.epoch {
                trace!(index = done.hidden, "dropping fade halted by stop");
                continue;
            }
            self.fire(EventKind::Transition, done.hidden);
        }
        self.dispatching = false;
    }

    fn fire(&mut self, kind: EventKind, index: usize) {
        let Some(mut handler) = self.handlers.take(kind) else {
            return;
        };
        trace!(event = kind.name(), index, "dispatch");
        handler(self, index);
        self.handlers.restore(kind, handler);
    }

    /// Index of the visible element, `None` for an inert rotation.
    pub fn index(&self) -> Option<usize> {
        self.state.current()
    }

    pub fn next_index(&self) -> Option<usize> {
        self.state.next()
    }

    pub fn loops_elapsed(&self) -> usize {
        self.state.loops()
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Time fed to [`update`](Rotation::update) so far.
    pub fn elapsed(&self) -> Duration {
        self.clock
    }

    /// Deadline of the next autoplay tick on the rotation clock.
    pub fn next_tick(&self) -> Option<Duration> {
        self.ticker.deadline()
    }
}

impl<R: Renderer> Drop for Rotation<R> {
    fn drop(&mut self) {
        if self.ticker.is_armed() {
            trace!("cancelling autoplay on drop");
        }
        self.ticker.cancel();
        if !self.is_inert() {
            self.renderer.halt();
        }
    }
}
