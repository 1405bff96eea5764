//! # Graphics Module
//!
//! Debug drawing for fiducial markers and camera poses.
//!
//! ## Architecture Overview
//!
//! - **Canvas** ([`canvas`]) - immediate-mode recorder with a scoped matrix stack
//! - **Primitives** ([`primitives`]) - crosses, circles, rectangles, axes, frustums, grids
//! - **Targets** ([`target`]) - marker layouts colored by identity
//! - **Rendering** ([`rendering`]) - wgpu upload and draw of recorded geometry
//!
//! ## Usage
//!
//! ```
//! use cgmath::Vector2;
//! use fiducials_draw::gfx::{canvas::Canvas, primitives, target::{draw_target, Target, TargetStyle}};
//!
//! let mut canvas = Canvas::new();
//! primitives::draw_grid(&mut canvas).unwrap();
//! primitives::draw_axis(&mut canvas, 1.0).unwrap();
//!
//! let target = Target::grid(4, 4, 20.0, 5.0).unwrap();
//! draw_target(&mut canvas, &target, Vector2::new(0.0, 0.0), &TargetStyle::default()).unwrap();
//!
//! let list = canvas.finish().unwrap();
//! assert!(list.line_count() > 0);
//! ```

pub mod canvas;
pub mod color;
pub mod primitives;
pub mod rendering;
pub mod style;
pub mod target;

// Re-export commonly used types
pub use canvas::{Canvas, DrawList, FrameGuard, Topology};
pub use color::Color;
pub use rendering::DebugLineRenderer;
pub use style::{DrawStyle, GridStyle};
pub use target::{Target, TargetStyle};
