use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeometryError, Result};
use crate::math::{angle, orthogonal, vector_angle, Precision, Vector3};

use super::{ConvexInterval, GreatArc, HyperplaneLocation, SpherePoint, Transform2S};

/// A great circle on the unit sphere.
///
/// Defined by a unit pole and an orthonormal frame `(u, v, pole)` with
/// `v = pole x u`. Points on the circle are parameterized by azimuth:
///
/// `P(az) = cos(az) * u + sin(az) * v`
///
/// so the circle is traversed counter-clockwise when viewed from the pole.
/// The hemisphere containing the pole is the circle's minus side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircle {
    pole: Vector3,
    u: Vector3,
    v: Vector3,
    precision: Precision,
}

impl GreatCircle {
    /// Creates a great circle from its pole.
    ///
    /// The pole is normalized; the zero-azimuth direction is chosen
    /// deterministically perpendicular to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the pole is zero-length or not finite.
    pub fn from_pole(pole: &Vector3, precision: Precision) -> Result<Self> {
        let pole = SpherePoint::from_vector(*pole)?;
        let pole = *pole.vector();
        let u = orthogonal(&pole).ok_or(GeometryError::ZeroVector)?;
        Ok(Self::from_frame(u, pole, precision))
    }

    /// Creates a great circle from its pole and a zero-azimuth direction.
    ///
    /// `u` is projected onto the circle's plane before use.
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is zero-length or `u` is parallel to
    /// the pole.
    pub fn from_pole_and_u(pole: &Vector3, u: &Vector3, precision: Precision) -> Result<Self> {
        let pole = *SpherePoint::from_vector(*pole)?.vector();
        let in_plane = u - pole * pole.dot(u);
        let u = SpherePoint::from_vector(in_plane).map_err(|_| {
            GeometryError::Degenerate("zero-azimuth direction is parallel to the pole".into())
        })?;
        Ok(Self::from_frame(*u.vector(), pole, precision))
    }

    /// Creates the great circle through two points, oriented from `a` toward
    /// `b` along the shorter path.
    ///
    /// `a` lies at azimuth 0 and `b` at an azimuth in `(0, pi)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are equal or antipodal within
    /// `precision`: no unique great circle passes through them.
    pub fn from_points(a: &SpherePoint, b: &SpherePoint, precision: Precision) -> Result<Self> {
        let dist = a.distance(b);
        if precision.eq_zero(dist) {
            return Err(GeometryError::Degenerate(format!(
                "cannot create a great circle from equal points {a} and {b}"
            ))
            .into());
        }
        if precision.eq(dist, PI) {
            return Err(GeometryError::Degenerate(format!(
                "cannot create a great circle from antipodal points {a} and {b}"
            ))
            .into());
        }

        let u = *a.vector();
        let pole = u.cross(b.vector());
        Ok(Self::from_frame(u, pole.normalize(), precision))
    }

    /// Builds the frame from a unit `u` and a unit pole orthogonal to it.
    fn from_frame(u: Vector3, pole: Vector3, precision: Precision) -> Self {
        let v = pole.cross(&u).normalize();
        Self {
            pole,
            u,
            v,
            precision,
        }
    }

    /// Returns the unit pole.
    #[must_use]
    pub fn pole(&self) -> &Vector3 {
        &self.pole
    }

    /// Returns the pole as a point on the sphere.
    #[must_use]
    pub fn pole_point(&self) -> SpherePoint {
        SpherePoint::from_normalized(self.pole)
    }

    /// Returns the zero-azimuth direction.
    #[must_use]
    pub fn u(&self) -> &Vector3 {
        &self.u
    }

    /// Returns the quarter-turn direction (`pole x u`).
    #[must_use]
    pub fn v(&self) -> &Vector3 {
        &self.v
    }

    /// Returns the precision context of this circle.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns the azimuth of the projection of `point` onto the circle, in
    /// `[0, 2pi)`.
    #[must_use]
    pub fn azimuth(&self, point: &SpherePoint) -> f64 {
        let p = point.vector();
        angle::normalize_between_zero_and_two_pi(p.dot(&self.v).atan2(p.dot(&self.u)))
    }

    /// Returns the point on the circle at the given azimuth.
    #[must_use]
    pub fn point_at(&self, azimuth: f64) -> SpherePoint {
        let (sin, cos) = azimuth.sin_cos();
        SpherePoint::from_normalized(self.u * cos + self.v * sin)
    }

    /// Returns the unit direction of travel at the given azimuth.
    #[must_use]
    pub fn tangent_at(&self, azimuth: f64) -> Vector3 {
        let (sin, cos) = azimuth.sin_cos();
        self.v * cos - self.u * sin
    }

    /// Returns the oriented angular distance of `point` from the circle.
    ///
    /// The pole has offset `-pi/2`, its antipode `pi/2`, and points on the
    /// circle 0.
    #[must_use]
    pub fn offset(&self, point: &SpherePoint) -> f64 {
        vector_angle(&self.pole, point.vector()) - FRAC_PI_2
    }

    /// Classifies a point against the circle: the pole side is `Minus`.
    #[must_use]
    pub fn classify(&self, point: &SpherePoint) -> HyperplaneLocation {
        match self.precision.compare(self.offset(point), 0.0) {
            std::cmp::Ordering::Less => HyperplaneLocation::Minus,
            std::cmp::Ordering::Equal => HyperplaneLocation::On,
            std::cmp::Ordering::Greater => HyperplaneLocation::Plus,
        }
    }

    /// Returns `true` if the point lies on the circle within precision.
    #[must_use]
    pub fn contains(&self, point: &SpherePoint) -> bool {
        self.classify(point) == HyperplaneLocation::On
    }

    /// Projects a point onto the circle.
    ///
    /// Returns `None` when the point is one of the circle's poles, where
    /// every point of the circle is equally close.
    #[must_use]
    pub fn project(&self, point: &SpherePoint) -> Option<SpherePoint> {
        let p = point.vector();
        let in_plane = p - self.pole * self.pole.dot(p);
        if self.precision.eq_zero(in_plane.norm()) {
            return None;
        }
        Some(SpherePoint::from_normalized(in_plane.normalize()))
    }

    /// Returns the intersection point of the two circles in the direction of
    /// `self.pole x other.pole`; its antipode is the other intersection.
    ///
    /// Returns `None` if the circles coincide (same or opposite poles).
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<SpherePoint> {
        let cross = self.pole.cross(&other.pole);
        let norm = cross.norm();
        if self.precision.eq_zero(norm) {
            return None;
        }
        Some(SpherePoint::from_normalized(cross / norm))
    }

    /// Returns the angle between the poles of the two circles, in `[0, pi]`.
    #[must_use]
    pub fn angle(&self, other: &Self) -> f64 {
        vector_angle(&self.pole, &other.pole)
    }

    /// Returns the signed turning angle at `at`, from this circle's direction
    /// of travel to `other`'s, in `(-pi, pi]`.
    ///
    /// Positive angles turn counter-clockwise as seen from outside the sphere
    /// looking down on `at`.
    #[must_use]
    pub fn signed_angle(&self, other: &Self, at: &SpherePoint) -> f64 {
        let p = at.vector();
        let from = self.pole.cross(p);
        let to = other.pole.cross(p);
        let turn = from.cross(&to).dot(p).atan2(from.dot(&to));
        if turn <= -PI {
            PI
        } else {
            turn
        }
    }

    /// Returns `true` if the poles point into the same hemisphere.
    #[must_use]
    pub fn similar_orientation(&self, other: &Self) -> bool {
        self.pole.dot(&other.pole) > 0.0
    }

    /// Returns `true` if both circles have the same oriented pole within
    /// `precision`. Circles with opposite poles trace the same points but
    /// in opposite directions and are not equal.
    #[must_use]
    pub fn eq(&self, other: &Self, precision: Precision) -> bool {
        precision.eq_zero(self.angle(other))
    }

    /// Returns `true` if both circles trace the same set of points, in
    /// either direction.
    #[must_use]
    pub fn coincides(&self, other: &Self, precision: Precision) -> bool {
        let angle = self.angle(other);
        precision.eq_zero(angle) || precision.eq(angle, PI)
    }

    /// Returns the same circle traversed in the opposite direction.
    ///
    /// The pole is negated and `u`/`v` are swapped, so a point at azimuth
    /// `az` on this circle sits at `pi/2 - az` on the reverse.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            pole: -self.pole,
            u: self.v,
            v: self.u,
            precision: self.precision,
        }
    }

    /// Applies an isometry of the sphere to the circle.
    ///
    /// The frame axes are mapped directly, so azimuths are preserved and the
    /// pole follows the handedness of the transformed frame.
    #[must_use]
    pub fn transform(&self, transform: &Transform2S) -> Self {
        let u = transform.apply_vector(&self.u).normalize();
        let v = transform.apply_vector(&self.v);
        let pole = u.cross(&v).normalize();
        Self::from_frame(u, pole, self.precision)
    }

    /// Returns the full arc covering the whole circle.
    #[must_use]
    pub fn span(&self) -> GreatArc {
        GreatArc::from_interval(*self, ConvexInterval::full(self.precision))
    }

    /// Returns the arc of this circle from `start` to `end` azimuth.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is degenerate or longer than `pi`.
    pub fn arc(&self, start: f64, end: f64) -> Result<GreatArc> {
        let interval = ConvexInterval::of(start, end, self.precision)?;
        Ok(GreatArc::from_interval(*self, interval))
    }

    /// Returns the arc of this circle between the projections of two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is degenerate or longer than `pi`.
    pub fn arc_between(&self, start: &SpherePoint, end: &SpherePoint) -> Result<GreatArc> {
        self.arc(self.azimuth(start), self.azimuth(end))
    }
}
