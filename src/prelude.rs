//! # Prelude
//!
//! Commonly used types and drawing functions in one import:
//!
//! ```
//! use fiducials_draw::prelude::*;
//!
//! let mut canvas = Canvas::new();
//! let radius = canvas.style().cross_radius;
//! draw_cross(&mut canvas, 10.0, 10.0, radius).unwrap();
//! ```

pub use crate::error::{DrawError, Result};
pub use crate::gfx::canvas::{Canvas, DrawList, FrameGuard, ImageBlit, Topology};
pub use crate::gfx::color::Color;
pub use crate::gfx::primitives::{
    draw_axis, draw_circle, draw_cross, draw_cross_2d, draw_cross_3d, draw_frustum, draw_frustum_at, draw_grid,
    draw_grid_with, draw_plane, draw_rectangle, draw_z0, Rect,
};
pub use crate::gfx::rendering::{DebugLineRenderer, DebugRendererConfig};
pub use crate::gfx::style::{DrawStyle, GridStyle};
pub use crate::gfx::target::{draw_target, draw_target_remapped, Target, TargetStyle};
pub use crate::math::{plane_basis, rotation_between, Plane, RigidTransform};

// Re-export common external dependencies
pub use cgmath::{Basis3, InnerSpace, Matrix3, One, Rotation, Rotation3, Vector2, Vector3, Vector4};
