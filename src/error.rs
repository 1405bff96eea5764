//! # Errors
//!
//! Every fallible operation in the crate reports a [`DrawError`]. Geometric
//! degeneracies and malformed draw parameters are returned to the caller, who
//! decides whether to skip the draw or substitute something else.

use thiserror::Error;

/// Errors produced by the math helpers and the drawing primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    /// A direction vector had zero length or non-finite components.
    #[error("degenerate input vector: {0}")]
    DegenerateVector(&'static str),

    /// The two vectors point in exactly opposite directions, so every axis
    /// perpendicular to them yields a valid 180 degree rotation.
    #[error("ambiguous rotation axis: vectors are antiparallel")]
    AmbiguousRotationAxis,

    /// A radius was negative or not finite.
    #[error("invalid radius {0}")]
    InvalidRadius(f64),

    /// A scale, spacing or appearance parameter was outside its valid range.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A marker identity remapping referenced a marker the target does not have.
    #[error("remap entry {entry} refers to marker {marker}, but the target has {len} markers")]
    RemapIndexOutOfRange { entry: usize, marker: i32, len: usize },

    /// Immediate-mode calls were issued out of order.
    #[error("primitive state: {0}")]
    PrimitiveState(&'static str),

    /// Pixel data did not match the declared image dimensions.
    #[error("image of {width}x{height} needs {expected} bytes, got {actual}")]
    ImageSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Image dimensions whose byte size does not fit in memory.
    #[error("image of {width}x{height} is too large")]
    ImageTooLarge { width: u32, height: u32 },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DrawError>;

impl DrawError {
    pub(crate) fn parameter(name: &'static str, value: f64) -> Self {
        DrawError::InvalidParameter { name, value }
    }
}
