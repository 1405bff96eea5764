//! # Geometry Helpers
//!
//! Small rigid-body helpers needed to place debug geometry in the world:
//!
//! - [`rotation_between`] - the minimal rotation taking one direction onto
//!   another, as a `cgmath::Basis3`
//! - [`RigidTransform`] - a pose (rotation plus translation)
//! - [`Plane`] and [`plane_basis`] - orienting a local `z = 0` frame onto a plane
//!
//! All math is done in `f64` on top of `cgmath`; the canvas converts to `f32`
//! only when vertices are recorded.

pub mod plane;
pub mod rigid;
pub mod rotation;

pub use plane::{plane_basis, Plane};
pub use rigid::RigidTransform;
pub use rotation::rotation_between;
