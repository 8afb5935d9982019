//! Error types for layout computation.
//!
//! Only programmer errors surface here. Inconsistent topology data (dangling
//! edges, duplicate ids, self-loops) is repaired during normalization and
//! never produces a [`LayoutError`].

use thiserror::Error;

/// The error type for layout operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Canvas width or height is zero, negative, or not finite.
    #[error("canvas {dimension} must be a positive finite number, got {value}")]
    InvalidCanvas {
        dimension: &'static str,
        value: f64,
    },

    /// The requested layout kind is not one of the supported strategies.
    #[error("unknown layout kind `{0}`")]
    UnknownKind(String),

    /// A host-supplied value could not be decoded into engine types.
    #[error("failed to decode {0}")]
    Decode(String),
}
