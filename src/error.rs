use thiserror::Error;

/// Errors raised by a [`Rotation`](crate::Rotation).
///
/// Misuse that the engine can absorb (double play, double stop, jumping to the
/// visible element, rotating fewer than two elements) is never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotationError {
    /// A target index outside `[0, len)`
    #[error("index {index} out of range for {len} elements")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of elements in the rotation
        len: usize,
    },

    /// A configuration that cannot be honoured for this element count
    #[error("invalid rotation configuration: {0}")]
    InvalidConfig(String),
}
