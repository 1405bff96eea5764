//! # Rotations
//!
//! Rotations are plain `cgmath::Basis3<f64>` values. This module adds the
//! minimal rotation between two directions, which `cgmath` only offers for
//! unit vectors and without reporting the antiparallel case.

use crate::error::{DrawError, Result};
use cgmath::{Basis3, InnerSpace, One, Rad, Rotation3, Vector3};

/// Returns the rotation taking the direction of `a` onto the direction of `b`,
/// rotating about `a × b`.
///
/// Neither input needs to be normalized, and the result does not depend on
/// their magnitudes. If the vectors are parallel the identity is returned.
///
/// # Errors
///
/// - [`DrawError::DegenerateVector`] if either input has zero length or
///   non-finite components.
/// - [`DrawError::AmbiguousRotationAxis`] if the vectors point in exactly
///   opposite directions.
///
/// # Examples
///
/// ```
/// use cgmath::{Rotation, Vector3};
/// use fiducials_draw::math::rotation_between;
///
/// let r = rotation_between(Vector3::unit_x(), Vector3::unit_y()).unwrap();
/// let v = r.rotate_vector(Vector3::unit_x());
/// assert!((v - Vector3::unit_y()).x.abs() < 1e-12);
/// ```
pub fn rotation_between(a: Vector3<f64>, b: Vector3<f64>) -> Result<Basis3<f64>> {
    let a_hat = normalized(a, "source vector")?;
    let b_hat = normalized(b, "target vector")?;

    let n = a_hat.cross(b_hat);
    let sin = n.magnitude();
    let cos = a_hat.dot(b_hat);
    if sin == 0.0 {
        if cos >= 0.0 {
            return Ok(Basis3::one());
        }
        return Err(DrawError::AmbiguousRotationAxis);
    }

    Ok(Basis3::from_axis_angle(n / sin, Rad(sin.atan2(cos))))
}

/// Unit vector along `v`.
///
/// The vector is first divided by its largest component so that neither huge
/// nor subnormal inputs overflow or underflow the squared length.
fn normalized(v: Vector3<f64>, what: &'static str) -> Result<Vector3<f64>> {
    if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
        return Err(DrawError::DegenerateVector(what));
    }
    let largest = v.x.abs().max(v.y.abs()).max(v.z.abs());
    if largest == 0.0 {
        return Err(DrawError::DegenerateVector(what));
    }
    let scaled = v / largest;
    Ok(scaled / scaled.magnitude())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use cgmath::{Deg, Matrix, Matrix3, Rotation, SquareMatrix};

    const EPS: f64 = 1e-12;

    fn assert_orthonormal(r: &Basis3<f64>) {
        let m: &Matrix3<f64> = r.as_ref();
        assert_abs_diff_eq!(m * m.transpose(), Matrix3::identity(), epsilon = EPS);
        assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = EPS);
    }

    #[test]
    fn test_x_to_y_is_quarter_turn_about_z() {
        let r = rotation_between(Vector3::unit_x(), Vector3::unit_y()).unwrap();
        assert_abs_diff_eq!(r, Basis3::from_angle_z(Deg(90.0)), epsilon = EPS);
        assert_abs_diff_eq!(
            r.rotate_vector(Vector3::unit_z()),
            Vector3::unit_z(),
            epsilon = EPS
        );
    }

    #[test]
    fn test_maps_source_direction_onto_target() {
        let pairs = [
            (Vector3::new(1.0, 2.0, 3.0), Vector3::new(-4.0, 0.5, 2.0)),
            (Vector3::new(0.0, 0.0, -1.0), Vector3::new(0.3, -0.2, 0.9)),
            (Vector3::new(5.0, -1.0, 0.0), Vector3::new(0.0, 0.0, 7.0)),
            (Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 1e-3, 0.0)),
        ];
        for (a, b) in pairs {
            let r = rotation_between(a, b).unwrap();
            assert_abs_diff_eq!(r.rotate_vector(a.normalize()), b.normalize(), epsilon = 1e-10);
            assert_orthonormal(&r);
        }
    }

    #[test]
    fn test_matches_two_basis_construction() {
        let a = Vector3::new(0.4f64, -1.2, 2.0).normalize();
        let b = Vector3::new(-2.0f64, 0.1, 0.7).normalize();
        let n = a.cross(b).normalize();
        let basis_a = Matrix3::from_cols(a, n, n.cross(a));
        let basis_b = Matrix3::from_cols(b, n, n.cross(b));

        let r = rotation_between(a, b).unwrap();
        let m: &Matrix3<f64> = r.as_ref();
        assert_abs_diff_eq!(*m, basis_b * basis_a.transpose(), epsilon = EPS);
    }

    #[test]
    fn test_extreme_magnitudes() {
        for scale in [1e100, 1e-100, 1e300, 1e-310] {
            let r = rotation_between(Vector3::unit_x() * scale, Vector3::unit_y() * scale).unwrap();
            assert_abs_diff_eq!(r, Basis3::from_angle_z(Deg(90.0)), epsilon = EPS);
            assert_orthonormal(&r);
        }

        let a = Vector3::new(1e200, -3e200, 2e200);
        let b = Vector3::new(-1e-200, 0.5e-200, 4e-200);
        let r = rotation_between(a, b).unwrap();
        assert_abs_diff_eq!(r.rotate_vector(a / 1e200).normalize(), (b / 1e-200).normalize(), epsilon = 1e-10);
        assert_orthonormal(&r);
    }

    #[test]
    fn test_parallel_inputs_give_identity() {
        let a = Vector3::new(0.2, -3.0, 1.5);
        assert_eq!(rotation_between(a, a).unwrap(), Basis3::one());
        assert_eq!(rotation_between(a, a * 4.0).unwrap(), Basis3::one());
    }

    #[test]
    fn test_antiparallel_inputs_are_rejected() {
        let a = Vector3::new(1.0, 2.0, -0.5);
        assert_eq!(
            rotation_between(a, -a),
            Err(DrawError::AmbiguousRotationAxis)
        );
        assert_eq!(
            rotation_between(a, a * -0.25),
            Err(DrawError::AmbiguousRotationAxis)
        );
    }

    #[test]
    fn test_zero_and_non_finite_inputs_are_rejected() {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        let a = Vector3::unit_x();
        assert!(matches!(
            rotation_between(zero, a),
            Err(DrawError::DegenerateVector(_))
        ));
        assert!(matches!(
            rotation_between(a, zero),
            Err(DrawError::DegenerateVector(_))
        ));
        assert!(matches!(
            rotation_between(Vector3::new(f64::NAN, 0.0, 1.0), a),
            Err(DrawError::DegenerateVector(_))
        ));
        assert!(matches!(
            rotation_between(a, Vector3::new(f64::INFINITY, 0.0, 0.0)),
            Err(DrawError::DegenerateVector(_))
        ));
    }

    #[test]
    fn test_scale_invariance() {
        let a = Vector3::new(0.4, -1.2, 2.0);
        let b = Vector3::new(-2.0, 0.1, 0.7);
        let r = rotation_between(a, b).unwrap();
        let scaled = rotation_between(a * 3.7, b * 0.02).unwrap();
        assert_abs_diff_eq!(r, scaled, epsilon = 1e-12);
    }

    #[test]
    fn test_invert_undoes_rotation() {
        let r = rotation_between(Vector3::new(1.0, 1.0, 0.0), Vector3::new(0.0, -1.0, 2.0)).unwrap();
        let v = Vector3::new(0.3, -2.0, 1.0);
        assert_abs_diff_eq!(r.invert().rotate_vector(r.rotate_vector(v)), v, epsilon = EPS);
        assert_abs_diff_eq!(r * r.invert(), Basis3::one(), epsilon = EPS);
    }
}
