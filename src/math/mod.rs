pub mod angle;
pub mod precision;

pub use precision::Precision;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 matrix type, used for isometries of the sphere.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Default geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns the angle between two non-zero vectors, in `[0, pi]`.
///
/// Uses `atan2(|a x b|, a . b)`, which stays accurate for nearly parallel
/// and nearly antiparallel vectors where `acos` loses precision.
#[must_use]
pub fn vector_angle(a: &Vector3, b: &Vector3) -> f64 {
    a.cross(b).norm().atan2(a.dot(b))
}

/// Returns a unit vector orthogonal to `v`, or `None` for a zero vector.
///
/// The choice is deterministic: the component with the smallest magnitude
/// relative to the norm is zeroed, which keeps the result well conditioned.
#[must_use]
pub fn orthogonal(v: &Vector3) -> Option<Vector3> {
    let threshold = 0.6 * v.norm();
    if threshold == 0.0 || !threshold.is_finite() {
        return None;
    }

    let result = if v.x.abs() <= threshold {
        let inv = 1.0 / (v.y * v.y + v.z * v.z).sqrt();
        Vector3::new(0.0, inv * v.z, -inv * v.y)
    } else if v.y.abs() <= threshold {
        let inv = 1.0 / (v.x * v.x + v.z * v.z).sqrt();
        Vector3::new(-inv * v.z, 0.0, inv * v.x)
    } else {
        let inv = 1.0 / (v.x * v.x + v.y * v.y).sqrt();
        Vector3::new(inv * v.y, -inv * v.x, 0.0)
    };
    Some(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn angle_between_axes() {
        assert!((vector_angle(&Vector3::x(), &Vector3::y()) - FRAC_PI_2).abs() < TOLERANCE);
        assert!((vector_angle(&Vector3::x(), &-Vector3::x()) - PI).abs() < TOLERANCE);
        assert!(vector_angle(&Vector3::z(), &(Vector3::z() * 3.0)).abs() < TOLERANCE);
    }

    #[test]
    fn angle_is_accurate_for_tiny_separation() {
        let a = Vector3::new(1.0, 1e-12, 0.0);
        assert!((vector_angle(&Vector3::x(), &a) - 1e-12).abs() < 1e-20);
    }

    #[test]
    fn orthogonal_is_unit_and_perpendicular() {
        for v in [
            Vector3::x(),
            Vector3::y(),
            Vector3::z(),
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-0.3, 0.0001, 5.0),
        ] {
            let o = orthogonal(&v).unwrap();
            assert!((o.norm() - 1.0).abs() < TOLERANCE);
            assert!(o.dot(&v).abs() < TOLERANCE);
        }
    }

    #[test]
    fn orthogonal_of_zero_is_none() {
        assert!(orthogonal(&Vector3::zeros()).is_none());
    }
}
