//! Rotation engine for slideshows.
//!
//! A [`Rotation`] cycles which single element of a [`Renderer`] is visible,
//! advancing on a timer or on demand, forward or in reverse, optionally
//! stopping by itself after a number of full cycles. The renderer does the
//! actual fading; the rotation decides which index to show, when, and fires
//! the `transition` and `cycleEnd` events.
//!
//! Time is virtual: the host calls [`Rotation::update`] with the frame time,
//! the same way a render loop ticks its animations.

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod fade;
pub mod log_renderer;
pub mod renderer;
pub mod rotation;
pub mod state;
pub mod ticker;

pub use config::RotationConfig;
pub use error::RotationError;
pub use events::EventKind;
pub use fade::Fade;
pub use log_renderer::LogRenderer;
pub use renderer::{ElementSource, FadeCompletion, Opacity, Renderer};
pub use rotation::Rotation;
pub use state::{Phase, RotationState};
pub use ticker::Ticker;
