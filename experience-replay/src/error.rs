//! Errors in the library.
use thiserror::Error;

/// Errors raised by replay buffer operations.
///
/// Except for [`ReplayBufferError::InvalidConfig`], every variant leaves the
/// buffer exactly as it was before the failed call.
#[derive(Error, Debug)]
pub enum ReplayBufferError {
    /// The buffer configuration cannot be used, e.g., zero capacity.
    #[error("Invalid replay buffer config: {0}")]
    InvalidConfig(String),

    /// A transition disagrees with the shape established for the buffer.
    #[error("Shape mismatch in {field}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Name of the offending field of the transition.
        field: &'static str,

        /// Shape the buffer accepts.
        expected: String,

        /// Shape of the rejected value.
        actual: String,
    },

    /// A batch larger than the buffer contents, or an empty batch, was requested.
    #[error("Insufficient data: requested {requested} transitions, {available} available")]
    InsufficientData {
        /// Requested batch size.
        requested: usize,

        /// Number of stored transitions.
        available: usize,
    },

    /// Sampled arrays could not be stacked along a batch axis.
    #[error("Failed to stack batch: {0}")]
    Stack(#[from] ndarray::ShapeError),

    /// The lock of a shared buffer was poisoned by a panicking holder.
    #[error("Replay buffer lock poisoned")]
    Poisoned,
}
