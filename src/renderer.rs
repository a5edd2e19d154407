use std::sync::mpsc::Sender;
use std::time::Duration;

/// An ordered, fixed set of elements addressed by index.
pub trait ElementSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> ElementSource for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T> ElementSource for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }
}

/// Target of a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opacity {
    Transparent,
    Opaque,
}

impl Opacity {
    pub fn alpha(self) -> f32 {
        match self {
            Opacity::Transparent => 0.0,
            Opacity::Opaque => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Completed {
    pub epoch: u64,
    pub hidden: usize,
}

/// Token handed to the renderer with a fade whose end the rotation waits for.
///
/// Calling [`complete`](FadeCompletion::complete) consumes the token, so a
/// fade can report its end only once. Dropping it without completing (for
/// example when the renderer halts the fade) reports nothing.
#[derive(Debug)]
pub struct FadeCompletion {
    sender: Sender<Completed>,
    epoch: u64,
    hidden: usize,
}

impl FadeCompletion {
    pub(crate) fn new(sender: Sender<Completed>, epoch: u64, hidden: usize) -> Self {
        Self { sender, epoch, hidden }
    }

    /// Index of the element whose fade this token belongs to.
    pub fn index(&self) -> usize {
        self.hidden
    }

    pub fn complete(self) {
        // A closed channel means the rotation is gone, nobody is left to notify.
        let _ = self.sender.send(Completed {
            epoch: self.epoch,
            hidden: self.hidden,
        });
    }
}

/// The visual side of a rotation.
///
/// A renderer owns the elements and performs the actual show, hide and fades.
/// The rotation only decides which index to show, so any effect works as long
/// as `fade_to` moves the element to the requested opacity over `duration`
/// and completes the token once when done.
pub trait Renderer: ElementSource {
    /// Make the element fully visible at once.
    fn show(&mut self, index: usize);

    /// Make the element fully invisible at once.
    fn hide(&mut self, index: usize);

    /// Put the element above the others.
    fn raise(&mut self, _index: usize) {}

    /// Put the element below the raised one.
    fn lower(&mut self, _index: usize) {}

    fn fade_to(
        &mut self,
        index: usize,
        opacity: Opacity,
        duration: Duration,
        on_complete: Option<FadeCompletion>,
    );

    /// Stop every fade in flight where it is, without completing it.
    fn halt(&mut self) {}

    /// Advance running animations by one frame.
    fn update(&mut self, _dt: Duration) {}
}
