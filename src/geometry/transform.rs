use nalgebra::{Rotation3, Unit};

use crate::error::{GeometryError, Result};
use crate::math::{Matrix3, Vector3, TOLERANCE};

use super::SpherePoint;

/// An isometry of the unit sphere: a rotation, a reflection, or a
/// composition of them, stored as an orthogonal 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2S {
    matrix: Matrix3,
}

impl Transform2S {
    /// Returns the identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Creates a transform from an orthogonal matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if `matrix * matrix^T` differs from the identity
    /// by more than the crate tolerance in any entry.
    pub fn from_matrix(matrix: Matrix3) -> Result<Self> {
        let deviation = matrix * matrix.transpose() - Matrix3::identity();
        if deviation.amax() > TOLERANCE * 1e3 {
            return Err(GeometryError::Degenerate(
                "sphere transform matrix must be orthogonal".into(),
            )
            .into());
        }
        Ok(Self { matrix })
    }

    /// Creates a right-handed rotation of `angle` radians about `axis`.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis is zero-length.
    pub fn from_axis_angle(axis: &Vector3, angle: f64) -> Result<Self> {
        let axis = Unit::try_new(*axis, 0.0).ok_or(GeometryError::ZeroVector)?;
        Ok(Self {
            matrix: Rotation3::from_axis_angle(&axis, angle).into_inner(),
        })
    }

    /// Creates a reflection through the plane with the given normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length.
    pub fn reflection(normal: &Vector3) -> Result<Self> {
        let n = Unit::try_new(*normal, 0.0).ok_or(GeometryError::ZeroVector)?;
        Ok(Self {
            matrix: Matrix3::identity() - n.as_ref() * n.transpose() * 2.0,
        })
    }

    /// Returns the underlying matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// Returns a transform that applies `self` first, then `other`.
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Returns the inverse transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            matrix: self.matrix.transpose(),
        }
    }

    /// Returns `true` if the transform preserves orientation (no reflection).
    #[must_use]
    pub fn preserves_orientation(&self) -> bool {
        self.matrix.determinant() > 0.0
    }

    /// Applies the transform to a direction vector.
    #[must_use]
    pub fn apply_vector(&self, v: &Vector3) -> Vector3 {
        self.matrix * v
    }

    /// Applies the transform to a point, renormalizing the result.
    #[must_use]
    pub fn apply(&self, point: &SpherePoint) -> SpherePoint {
        let v = self.apply_vector(point.vector());
        SpherePoint::from_normalized(v / v.norm())
    }
}

impl Default for Transform2S {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Precision;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_about_z() {
        let t = Transform2S::from_axis_angle(&Vector3::z(), FRAC_PI_2).unwrap();
        let p = t.apply(&SpherePoint::PLUS_I);
        assert!(p.eq(&SpherePoint::PLUS_J, Precision::default()));
        assert!(t.preserves_orientation());
    }

    #[test]
    fn reflection_flips_orientation() {
        let t = Transform2S::reflection(&Vector3::x()).unwrap();
        assert!(t.apply(&SpherePoint::PLUS_I).eq(&SpherePoint::MINUS_I, Precision::default()));
        assert!(t.apply(&SpherePoint::PLUS_J).eq(&SpherePoint::PLUS_J, Precision::default()));
        assert!(!t.preserves_orientation());
    }

    #[test]
    fn composition_and_inverse() {
        let a = Transform2S::from_axis_angle(&Vector3::new(1.0, 1.0, 0.0), 0.7).unwrap();
        let b = Transform2S::from_axis_angle(&Vector3::z(), -1.3).unwrap();
        let p = SpherePoint::from_azimuth_polar(0.4, 1.2);
        let composed = a.then(&b).apply(&p);
        let stepwise = b.apply(&a.apply(&p));
        assert!(composed.eq(&stepwise, Precision::default()));

        let back = a.inverse().apply(&a.apply(&p));
        assert!(back.eq(&p, Precision::default()));
    }

    #[test]
    fn rejects_non_orthogonal_matrix() {
        assert!(Transform2S::from_matrix(Matrix3::identity() * 2.0).is_err());
        assert!(Transform2S::from_matrix(Matrix3::identity()).is_ok());
    }

    #[test]
    fn zero_axis_is_rejected() {
        assert!(Transform2S::from_axis_angle(&Vector3::zeros(), 1.0).is_err());
        assert!(Transform2S::reflection(&Vector3::zeros()).is_err());
    }
}
