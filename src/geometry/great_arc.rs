use std::f64::consts::FRAC_PI_2;
use std::fmt;

use crate::error::Result;
use crate::math::{Precision, Vector3};

use super::{
    ConvexInterval, CutAngle, GreatCircle, RegionLocation, SpherePoint, Split, Transform2S,
};

/// A great-circle arc: a convex azimuth interval of a great circle.
///
/// The arc runs counter-clockwise (as seen from the circle's pole) from the
/// interval's lower bound to its upper bound. A full arc covers the whole
/// circle and has no endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatArc {
    circle: GreatCircle,
    interval: ConvexInterval,
}

impl GreatArc {
    /// Creates an arc from a circle and an interval of its azimuths.
    ///
    /// The arc classifies points with the circle's precision.
    #[must_use]
    pub fn from_interval(circle: GreatCircle, interval: ConvexInterval) -> Self {
        Self {
            circle,
            interval: interval.with_precision(circle.precision()),
        }
    }

    /// Creates the shortest arc from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points are equal or antipodal within
    /// `precision`.
    pub fn from_points(
        start: &SpherePoint,
        end: &SpherePoint,
        precision: Precision,
    ) -> Result<Self> {
        let circle = GreatCircle::from_points(start, end, precision)?;
        circle.arc(0.0, circle.azimuth(end))
    }

    #[must_use]
    pub fn circle(&self) -> &GreatCircle {
        &self.circle
    }

    #[must_use]
    pub fn interval(&self) -> &ConvexInterval {
        &self.interval
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.circle.precision()
    }

    /// Returns `true` if the arc covers the whole circle.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.interval.is_full()
    }

    /// Always `false`: an arc is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Always `true`: arcs on the sphere are bounded.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        true
    }

    /// Always `false`.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        false
    }

    /// Returns the angular length of the arc (`2pi` for a full arc).
    #[must_use]
    pub fn size(&self) -> f64 {
        self.interval.size()
    }

    #[must_use]
    pub fn start_point(&self) -> Option<SpherePoint> {
        self.interval.min().map(|az| self.circle.point_at(az))
    }

    #[must_use]
    pub fn end_point(&self) -> Option<SpherePoint> {
        self.interval.max().map(|az| self.circle.point_at(az))
    }

    #[must_use]
    pub fn midpoint(&self) -> Option<SpherePoint> {
        self.interval.midpoint().map(|az| self.circle.point_at(az))
    }

    /// Returns the unit direction of travel at the start point.
    #[must_use]
    pub fn start_tangent(&self) -> Option<Vector3> {
        self.interval.min().map(|az| self.circle.tangent_at(az))
    }

    /// Returns the unit direction of travel at the end point.
    #[must_use]
    pub fn end_tangent(&self) -> Option<Vector3> {
        self.interval.max().map(|az| self.circle.tangent_at(az))
    }

    /// Classifies a point against the arc.
    ///
    /// Points off the arc's circle by more than the precision are outside;
    /// points on the circle are classified by azimuth against the interval.
    #[must_use]
    pub fn classify(&self, point: &SpherePoint) -> RegionLocation {
        if self.circle.contains(point) {
            self.interval.classify(self.circle.azimuth(point))
        } else {
            RegionLocation::Outside
        }
    }

    /// Returns `true` if the point is inside the arc or on its boundary.
    #[must_use]
    pub fn contains(&self, point: &SpherePoint) -> bool {
        self.classify(point) != RegionLocation::Outside
    }

    /// Returns the point of the arc closest to `point`.
    ///
    /// For a pole of the circle, where every point of the circle is equally
    /// close, the start point (or azimuth 0 on a full arc) is returned.
    #[must_use]
    pub fn closest(&self, point: &SpherePoint) -> SpherePoint {
        let fallback = self
            .start_point()
            .unwrap_or_else(|| self.circle.point_at(0.0));
        let Some(projected) = self.circle.project(point) else {
            return fallback;
        };

        if self.interval.contains(self.circle.azimuth(&projected)) {
            return projected;
        }

        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) => {
                if start.distance(point) <= end.distance(point) {
                    start
                } else {
                    end
                }
            }
            _ => fallback,
        }
    }

    /// Returns the arc covering the same points in the opposite direction.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            circle: self.circle.reverse(),
            interval: self.interval.reflect().translate(FRAC_PI_2),
        }
    }

    /// Applies an isometry of the sphere. The interval is unchanged since
    /// the circle's frame moves with the transform.
    #[must_use]
    pub fn transform(&self, transform: &Transform2S) -> Self {
        Self {
            circle: self.circle.transform(transform),
            interval: self.interval,
        }
    }

    /// Splits the arc by a great circle.
    ///
    /// The minus part lies on the splitter's pole side. An arc entirely on
    /// one side is returned unchanged on that side; an arc on the splitter
    /// itself (coincident or opposite circles) yields neither part.
    #[must_use]
    pub fn split(&self, splitter: &GreatCircle) -> Split<Self> {
        let precision = self.precision();
        let cross = splitter.pole().cross(self.circle.pole());
        if precision.eq_zero(cross.norm()) {
            return Split::new(None, None);
        }

        // Along this circle, splitter.pole . P(az) = a cos(az) + b sin(az),
        // which is positive (minus side) within pi/2 of atan2(b, a) and
        // changes to negative (plus side) at atan2(b, a) + pi/2.
        let a = splitter.pole().dot(self.circle.u());
        let b = splitter.pole().dot(self.circle.v());
        let cut = CutAngle::new(b.atan2(a) + FRAC_PI_2, true, precision);

        let circle = self.circle;
        self.interval
            .split_diameter(&cut)
            .map(|interval| Self { circle, interval })
    }

    /// Returns the convex pieces of the arc: the arc itself.
    #[must_use]
    pub fn to_convex(&self) -> Vec<Self> {
        vec![*self]
    }
}

impl fmt::Display for GreatArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(start), Some(end)) = (self.start_point(), self.end_point()) {
            write!(f, "GreatArc[{start} -> {end}]")
        } else {
            let p = self.circle.pole();
            write!(f, "GreatArc[full, pole ({:.6}, {:.6}, {:.6})]", p.x, p.y, p.z)
        }
    }
}
