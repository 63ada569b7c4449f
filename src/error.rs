//! The error taxonomy shared across the crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by network construction, evaluation, and training.
///
/// Every error is propagated synchronously to the immediate caller; the
/// core never logs, swallows, or retries. A caller driving a training loop
/// decides whether to abort, skip the example, or halt the run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A vector or matrix operand did not have the expected length.
    #[error("shape mismatch: expected length {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A layer's weights were read before `add_weights` was called.
    #[error("weights have not been initialized")]
    UninitializedWeights,

    /// The operation is not defined for this kind of layer.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// A scripted random source was asked for more values than it holds.
    #[error("random source exhausted")]
    RandomExhausted,

    /// A constructor was given a degenerate size or rate.
    #[error("invalid construction: {0}")]
    InvalidConstruction(&'static str),
}
