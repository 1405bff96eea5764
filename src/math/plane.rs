//! # Planes
//!
//! A [`Plane`] is the set of points `x` with `normal · x + offset = 0`, stored
//! the same way as the 4-vector `(n, d)` used by plane-fitting code.

use super::rigid::RigidTransform;
use super::rotation::rotation_between;
use crate::error::Result;
use cgmath::{InnerSpace, Vector3, Vector4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub offset: f64,
}

impl Plane {
    pub fn new(normal: Vector3<f64>, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Interprets `(x, y, z, w)` as normal `(x, y, z)` and offset `w`.
    pub fn from_vec4(n: Vector4<f64>) -> Self {
        Self::new(n.truncate(), n.w)
    }

    pub fn to_vec4(&self) -> Vector4<f64> {
        self.normal.extend(self.offset)
    }

    /// Signed distance of `p` from the plane, in units of `|normal|`.
    pub fn signed_distance(&self, p: Vector3<f64>) -> f64 {
        self.normal.dot(p) + self.offset
    }
}

/// Pose `T_wp` placing the local `z = 0` plane onto `plane`.
///
/// The local `-z` axis is turned onto the plane normal and the origin is moved
/// to `-offset * normal`, which lies on the plane when the normal has unit
/// length.
///
/// # Errors
///
/// Fails with [`DrawError::AmbiguousRotationAxis`](crate::DrawError::AmbiguousRotationAxis)
/// when the normal is exactly `+z`, and with
/// [`DrawError::DegenerateVector`](crate::DrawError::DegenerateVector) for a zero normal.
pub fn plane_basis(plane: &Plane) -> Result<RigidTransform> {
    let rotation = rotation_between(Vector3::new(0.0, 0.0, -1.0), plane.normal)?;
    Ok(RigidTransform::new(rotation, plane.normal * -plane.offset))
}
