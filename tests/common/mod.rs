#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rotator::{
    ElementSource, EventKind, Fade, FadeCompletion, Opacity, Renderer, Rotation, RotationConfig,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Show(usize),
    Hide(usize),
    Raise(usize),
    Lower(usize),
    FadeTo(usize, Opacity, Duration),
    Halt,
}

/// Renderer that records every call and runs fades on the rotation clock.
#[derive(Default)]
pub struct RecordingRenderer {
    len: usize,
    pub calls: Vec<Call>,
    fades: Vec<Fade>,
    /// Report fades as finished inside `fade_to`.
    pub immediate: bool,
    /// Keep fades running through `halt`.
    pub ignore_halt: bool,
}

impl RecordingRenderer {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    pub fn immediate(len: usize) -> Self {
        Self {
            immediate: true,
            ..Self::new(len)
        }
    }

    /// Indices faded in, in order: one entry per visual swap.
    pub fn shown(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::FadeTo(index, Opacity::Opaque, _) => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn halts(&self) -> usize {
        self.calls.iter().filter(|call| **call == Call::Halt).count()
    }
}

impl ElementSource for RecordingRenderer {
    fn len(&self) -> usize {
        self.len
    }
}

impl Renderer for RecordingRenderer {
    fn show(&mut self, index: usize) {
        self.calls.push(Call::Show(index));
    }

    fn hide(&mut self, index: usize) {
        self.calls.push(Call::Hide(index));
    }

    fn raise(&mut self, index: usize) {
        self.calls.push(Call::Raise(index));
    }

    fn lower(&mut self, index: usize) {
        self.calls.push(Call::Lower(index));
    }

    fn fade_to(
        &mut self,
        index: usize,
        opacity: Opacity,
        duration: Duration,
        on_complete: Option<FadeCompletion>,
    ) {
        self.calls.push(Call::FadeTo(index, opacity, duration));
        match on_complete {
            Some(completion) if self.immediate => completion.complete(),
            completion => self.fades.push(Fade::new(0.0, opacity, duration, completion)),
        }
    }

    fn halt(&mut self) {
        self.calls.push(Call::Halt);
        if !self.ignore_halt {
            self.fades.clear();
        }
    }

    fn update(&mut self, dt: Duration) {
        for fade in self.fades.iter_mut() {
            fade.update(dt);
        }
        self.fades.retain(|fade| !fade.is_finished());
    }
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub fn config(delay: u64, speed: u64) -> RotationConfig {
    RotationConfig::default()
        .with_delay(ms(delay))
        .with_speed(ms(speed))
}

/// Every index an event was fired with, in order.
pub fn record(rotation: &mut Rotation<RecordingRenderer>, kind: EventKind) -> Rc<RefCell<Vec<usize>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    rotation.on(kind, move |_, index| sink.borrow_mut().push(index));
    seen
}

/// Feed `total` of clock time in `step` sized frames.
pub fn run_for(rotation: &mut Rotation<RecordingRenderer>, total: Duration, step: Duration) {
    let end = rotation.elapsed() + total;
    while rotation.elapsed() < end {
        rotation.update(step);
    }
}
