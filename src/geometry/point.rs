use std::fmt;

use crate::error::{GeometryError, Result};
use crate::math::{angle, vector_angle, Precision, Vector3};

/// A point on the unit sphere.
///
/// Stored as a unit vector; azimuth (longitude, measured from `+x` toward
/// `+y`) and polar angle (colatitude, measured from `+z`) are derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpherePoint {
    vector: Vector3,
}

impl SpherePoint {
    /// The point on the `+x` axis.
    pub const PLUS_I: Self = Self::from_unit(Vector3::new(1.0, 0.0, 0.0));
    /// The point on the `-x` axis.
    pub const MINUS_I: Self = Self::from_unit(Vector3::new(-1.0, 0.0, 0.0));
    /// The point on the `+y` axis.
    pub const PLUS_J: Self = Self::from_unit(Vector3::new(0.0, 1.0, 0.0));
    /// The point on the `-y` axis.
    pub const MINUS_J: Self = Self::from_unit(Vector3::new(0.0, -1.0, 0.0));
    /// The point on the `+z` axis (polar angle 0).
    pub const PLUS_K: Self = Self::from_unit(Vector3::new(0.0, 0.0, 1.0));
    /// The point on the `-z` axis (polar angle pi).
    pub const MINUS_K: Self = Self::from_unit(Vector3::new(0.0, 0.0, -1.0));

    const fn from_unit(vector: Vector3) -> Self {
        Self { vector }
    }

    /// Creates a point from a direction vector, normalizing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the vector is zero-length or not finite.
    pub fn from_vector(vector: Vector3) -> Result<Self> {
        let norm = vector.norm();
        if norm == 0.0 || !norm.is_finite() {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self::from_unit(vector / norm))
    }

    /// Creates a point from an azimuth and a polar angle, both in radians.
    #[must_use]
    pub fn from_azimuth_polar(azimuth: f64, polar: f64) -> Self {
        let (sin_az, cos_az) = azimuth.sin_cos();
        let (sin_polar, cos_polar) = polar.sin_cos();
        Self::from_unit(Vector3::new(
            cos_az * sin_polar,
            sin_az * sin_polar,
            cos_polar,
        ))
    }

    /// Wraps a vector already known to be unit length.
    pub(crate) fn from_normalized(vector: Vector3) -> Self {
        Self::from_unit(vector)
    }

    /// Returns the unit vector of the point.
    #[must_use]
    pub fn vector(&self) -> &Vector3 {
        &self.vector
    }

    /// Returns the azimuth in `[0, 2pi)`.
    #[must_use]
    pub fn azimuth(&self) -> f64 {
        angle::normalize_between_zero_and_two_pi(self.vector.y.atan2(self.vector.x))
    }

    /// Returns the polar angle in `[0, pi]`.
    #[must_use]
    pub fn polar(&self) -> f64 {
        self.vector.x.hypot(self.vector.y).atan2(self.vector.z)
    }

    /// Returns the diametrically opposite point.
    #[must_use]
    pub fn antipode(&self) -> Self {
        Self::from_unit(-self.vector)
    }

    /// Returns the great-circle distance to `other`, in `[0, pi]`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        vector_angle(&self.vector, &other.vector)
    }

    /// Returns `true` if the two points are within `precision` of each other.
    #[must_use]
    pub fn eq(&self, other: &Self, precision: Precision) -> bool {
        precision.eq_zero(self.distance(other))
    }
}

impl fmt::Display for SpherePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(az {:.6}, polar {:.6})", self.azimuth(), self.polar())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn azimuth_polar_round_trip_through_vector() {
        let p = SpherePoint::from_azimuth_polar(1.25, 0.75);
        let q = SpherePoint::from_vector(*p.vector() * 7.0).unwrap();
        assert!((q.azimuth() - 1.25).abs() < TOLERANCE);
        assert!((q.polar() - 0.75).abs() < TOLERANCE);
    }

    #[test]
    fn axis_points_have_expected_angles() {
        assert!(SpherePoint::PLUS_K.polar().abs() < TOLERANCE);
        assert!((SpherePoint::MINUS_K.polar() - PI).abs() < TOLERANCE);
        assert!((SpherePoint::PLUS_J.azimuth() - FRAC_PI_2).abs() < TOLERANCE);
        assert!((SpherePoint::MINUS_J.azimuth() - 1.5 * PI).abs() < TOLERANCE);
        assert!((SpherePoint::MINUS_I.polar() - FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn zero_vector_is_rejected() {
        assert!(SpherePoint::from_vector(Vector3::zeros()).is_err());
        assert!(SpherePoint::from_vector(Vector3::new(f64::NAN, 0.0, 1.0)).is_err());
    }

    #[test]
    fn distance_and_antipode() {
        let p = SpherePoint::from_azimuth_polar(0.3, 1.1);
        assert!((p.distance(&p.antipode()) - PI).abs() < TOLERANCE);
        assert!((SpherePoint::PLUS_I.distance(&SpherePoint::PLUS_J) - FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn tolerant_equality() {
        let coarse = Precision::new(1e-3);
        let fine = Precision::new(1e-6);
        let p = SpherePoint::from_azimuth_polar(0.0, FRAC_PI_2);
        let q = SpherePoint::from_azimuth_polar(1e-4, FRAC_PI_2);
        assert!(p.eq(&q, coarse));
        assert!(!p.eq(&q, fine));
    }
}
