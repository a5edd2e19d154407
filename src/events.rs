use crate::renderer::Renderer;
use crate::rotation::Rotation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Transition, // A swap finished, carries the index that was hidden
    CycleEnd,   // A bounded rotation stopped itself, carries the last shown index
}

impl EventKind {
    /// Look up an event by its public name, `transition` or `cycleEnd`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "transition" => Some(EventKind::Transition),
            "cycleEnd" => Some(EventKind::CycleEnd),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Transition => "transition",
            EventKind::CycleEnd => "cycleEnd",
        }
    }
}

pub type Handler<R> = Box<dyn FnMut(&mut Rotation<R>, usize)>;

/// One optional handler per event. An empty slot does nothing when fired.
pub struct Handlers<R: Renderer> {
    transition: Option<Handler<R>>,
    cycle_end: Option<Handler<R>>,
}

impl<R: Renderer> Default for Handlers<R> {
    fn default() -> Self {
        Self {
            transition: None,
            cycle_end: None,
        }
    }
}

impl<R: Renderer> Handlers<R> {
    fn slot(&mut self, kind: EventKind) -> &mut Option<Handler<R>> {
        match kind {
            EventKind::Transition => &mut self.transition,
            EventKind::CycleEnd => &mut self.cycle_end,
        }
    }

    pub fn set(&mut self, kind: EventKind, handler: Handler<R>) {
        *self.slot(kind) = Some(handler);
    }

    pub fn is_bound(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Transition => self.transition.is_some(),
            EventKind::CycleEnd => self.cycle_end.is_some(),
        }
    }

    /// Take the handler out for the duration of a call.
    pub fn take(&mut self, kind: EventKind) -> Option<Handler<R>> {
        self.slot(kind).take()
    }

    /// Put a taken handler back unless the slot was rebound meanwhile.
    pub fn restore(&mut self, kind: EventKind, handler: Handler<R>) {
        self.slot(kind).get_or_insert(handler);
    }
}
