// src/lib.rs
//! Fiducials Draw
//!
//! Debug drawing helpers for a fiducial-marker tracking pipeline: cross and
//! circle markers, marker targets, coordinate axes, camera frustums and ground
//! grids. Geometry is recorded on an immediate-mode style [`gfx::Canvas`] and
//! rendered with wgpu.

pub mod error;
pub mod gfx;
pub mod math;
pub mod prelude;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use error::{DrawError, Result};
pub use gfx::Canvas;
