//! # Rigid Transforms
//!
//! [`RigidTransform`] is a pose: a rotation followed by a translation. Naming
//! follows the `T_ab` convention, where `T_ab` maps points expressed in frame
//! `b` into frame `a`, so `T_ac = T_ab * T_bc`.

use cgmath::{Basis3, Matrix3, Matrix4, One, Rotation, Vector3, Zero};
use std::ops::Mul;

/// Rotation plus translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    pub rotation: Basis3<f64>,
    pub translation: Vector3<f64>,
}

impl RigidTransform {
    pub fn new(rotation: Basis3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Basis3::one(), Vector3::zero())
    }

    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self::new(Basis3::one(), translation)
    }

    pub fn from_rotation(rotation: Basis3<f64>) -> Self {
        Self::new(rotation, Vector3::zero())
    }

    /// `self * other`: apply `other` first, then `self`.
    pub fn compose(&self, other: &RigidTransform) -> RigidTransform {
        RigidTransform {
            rotation: self.rotation * other.rotation,
            translation: self.rotation.rotate_vector(other.translation) + self.translation,
        }
    }

    pub fn inverse(&self) -> RigidTransform {
        let rotation = self.rotation.invert();
        RigidTransform {
            rotation,
            translation: -rotation.rotate_vector(self.translation),
        }
    }

    pub fn transform_point(&self, p: Vector3<f64>) -> Vector3<f64> {
        self.rotation.rotate_vector(p) + self.translation
    }

    /// Rotates a direction; translation does not apply.
    pub fn transform_vector(&self, v: Vector3<f64>) -> Vector3<f64> {
        self.rotation.rotate_vector(v)
    }

    /// Homogeneous 4x4 matrix, column-major like every `cgmath` matrix.
    pub fn to_matrix4(&self) -> Matrix4<f64> {
        let mut m = Matrix4::from(Matrix3::from(self.rotation));
        m.w = self.translation.extend(1.0);
        m
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: RigidTransform) -> RigidTransform {
        self.compose(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::{Deg, Rotation3, SquareMatrix};

    fn sample_pose() -> RigidTransform {
        RigidTransform::new(Basis3::from_angle_z(Deg(30.0)), Vector3::new(1.0, -2.0, 0.5))
    }

    #[test]
    fn test_compose_matches_sequential_application() {
        let t_ab = sample_pose();
        let t_bc = RigidTransform::new(Basis3::from_angle_x(Deg(-45.0)), Vector3::new(0.0, 3.0, 1.0));
        let p = Vector3::new(0.2, 0.4, -1.0);

        let direct = (t_ab * t_bc).transform_point(p);
        let stepwise = t_ab.transform_point(t_bc.transform_point(p));
        assert_abs_diff_eq!(direct, stepwise, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_round_trips_points() {
        let t = sample_pose();
        let p = Vector3::new(4.0, 5.0, 6.0);
        assert_abs_diff_eq!(t.inverse().transform_point(t.transform_point(p)), p, epsilon = 1e-12);
        assert_abs_diff_eq!(
            (t * t.inverse()).to_matrix4(),
            Matrix4::identity(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_matrix_agrees_with_transform_point() {
        let t = sample_pose();
        let p = Vector3::new(-1.0, 0.5, 2.0);
        let h = t.to_matrix4() * p.extend(1.0);
        assert_abs_diff_eq!(h.truncate(), t.transform_point(p), epsilon = 1e-12);
        assert_eq!(h.w, 1.0);
    }

    #[test]
    fn test_vectors_ignore_translation() {
        let t = RigidTransform::from_translation(Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(t.transform_vector(Vector3::unit_y()), Vector3::unit_y());
    }
}
