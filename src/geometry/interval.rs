use std::f64::consts::{PI, TAU};
use std::ops::Deref;

use crate::error::{GeometryError, SphericalError};
use crate::math::{angle, Precision};

use super::{HyperplaneLocation, RegionLocation, Split};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bounds {
    Full,
    Empty,
    /// `min` in `[0, 2pi)`, `max` in `(min, min + 2pi)`.
    Range { min: f64, max: f64 },
}

/// A region of a circle's azimuth domain.
///
/// An interval is full (no boundary), empty, or a range running
/// counter-clockwise from `min` to `max`. Bounds are normalized so that
/// `min` lies in `[0, 2pi)` and `max` is greater than `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularInterval {
    bounds: Bounds,
    precision: Precision,
}

impl AngularInterval {
    /// Returns the interval covering the whole circle.
    #[must_use]
    pub fn full(precision: Precision) -> Self {
        Self {
            bounds: Bounds::Full,
            precision,
        }
    }

    /// Returns the interval containing no azimuths.
    #[must_use]
    pub fn empty(precision: Precision) -> Self {
        Self {
            bounds: Bounds::Empty,
            precision,
        }
    }

    /// Creates the interval running counter-clockwise from `min` to `max`.
    ///
    /// `max` is shifted by whole turns to lie above `min`, so `of(1.5pi,
    /// 0.1pi)` covers `[1.5pi, 2.1pi]`. A span of at least `2pi` gives the
    /// full interval.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound is not finite, or if the bounds are
    /// equivalent under `precision`.
    pub fn of(min: f64, max: f64, precision: Precision) -> Result<Self, SphericalError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GeometryError::InvalidInterval {
                min,
                max,
                reason: "bounds must be finite",
            }
            .into());
        }

        let width = max - min;
        if precision.gte(width.abs(), TAU) {
            return Ok(Self::full(precision));
        }

        let size = angle::normalize_between_zero_and_two_pi(width);
        if precision.eq_zero(size) || precision.eq(size, TAU) {
            return Err(GeometryError::InvalidInterval {
                min,
                max,
                reason: "bounds are equivalent",
            }
            .into());
        }

        Ok(Self::range(min, size, precision))
    }

    /// Builds a range from an arbitrary start and a size in `(0, 2pi)`.
    fn range(min: f64, size: f64, precision: Precision) -> Self {
        let min = angle::normalize_between_zero_and_two_pi(min);
        Self {
            bounds: Bounds::Range {
                min,
                max: min + size,
            },
            precision,
        }
    }

    /// Returns the lower bound, or `None` if the interval has no boundary.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        match self.bounds {
            Bounds::Range { min, .. } => Some(min),
            Bounds::Full | Bounds::Empty => None,
        }
    }

    /// Returns the upper bound, or `None` if the interval has no boundary.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        match self.bounds {
            Bounds::Range { max, .. } => Some(max),
            Bounds::Full | Bounds::Empty => None,
        }
    }

    /// Returns the precision context of this interval.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.bounds == Bounds::Full
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds == Bounds::Empty
    }

    /// Returns the angular size: `2pi` when full, 0 when empty.
    #[must_use]
    pub fn size(&self) -> f64 {
        match self.bounds {
            Bounds::Full => TAU,
            Bounds::Empty => 0.0,
            Bounds::Range { min, max } => max - min,
        }
    }

    /// Returns the azimuth halfway between the bounds, or `None` if the
    /// interval has no boundary.
    #[must_use]
    pub fn midpoint(&self) -> Option<f64> {
        match self.bounds {
            Bounds::Range { min, max } => Some(0.5 * (min + max)),
            Bounds::Full | Bounds::Empty => None,
        }
    }

    /// Returns `true` if the interval is full, empty, or no larger than `pi`.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        match self.bounds {
            Bounds::Full | Bounds::Empty => true,
            Bounds::Range { min, max } => self.precision.lte(max - min, PI),
        }
    }

    /// Classifies an azimuth against the interval.
    #[must_use]
    pub fn classify(&self, azimuth: f64) -> RegionLocation {
        match self.bounds {
            Bounds::Full => RegionLocation::Inside,
            Bounds::Empty => RegionLocation::Outside,
            Bounds::Range { min, max } => {
                if self.precision.eq_zero(angle::azimuth_distance(azimuth, min))
                    || self.precision.eq_zero(angle::azimuth_distance(azimuth, max))
                {
                    RegionLocation::Boundary
                } else if angle::normalize_above(azimuth, min) < max {
                    RegionLocation::Inside
                } else {
                    RegionLocation::Outside
                }
            }
        }
    }

    /// Returns `true` if the azimuth is inside or on the boundary.
    #[must_use]
    pub fn contains(&self, azimuth: f64) -> bool {
        self.classify(azimuth) != RegionLocation::Outside
    }

    /// Returns the interval rotated by `delta` radians.
    #[must_use]
    pub fn translate(&self, delta: f64) -> Self {
        match self.bounds {
            Bounds::Range { min, max } => Self::range(min + delta, max - min, self.precision),
            Bounds::Full | Bounds::Empty => *self,
        }
    }

    /// Returns the interval mirrored through azimuth 0 (`az -> -az`).
    #[must_use]
    pub fn reflect(&self) -> Self {
        match self.bounds {
            Bounds::Range { min, max } => Self::range(-max, max - min, self.precision),
            Bounds::Full | Bounds::Empty => *self,
        }
    }

    /// Splits the interval into convex pieces.
    ///
    /// An interval larger than `pi` is cut at its midpoint; the empty
    /// interval yields no pieces.
    #[must_use]
    pub fn to_convex(&self) -> Vec<ConvexInterval> {
        match self.bounds {
            Bounds::Empty => Vec::new(),
            Bounds::Full => vec![ConvexInterval(*self)],
            Bounds::Range { min, max } => {
                if self.is_convex() {
                    vec![ConvexInterval(*self)]
                } else {
                    let half = 0.5 * (max - min);
                    vec![
                        ConvexInterval(Self::range(min, half, self.precision)),
                        ConvexInterval(Self::range(min + half, half, self.precision)),
                    ]
                }
            }
        }
    }

    pub(crate) fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }
}

/// A non-empty angular interval no larger than `pi`, or the full circle.
///
/// This is the interval held by every great arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvexInterval(AngularInterval);

impl ConvexInterval {
    /// Returns the full convex interval.
    #[must_use]
    pub fn full(precision: Precision) -> Self {
        Self(AngularInterval::full(precision))
    }

    /// Creates the convex interval from `min` to `max`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are invalid or span more than `pi`.
    pub fn of(min: f64, max: f64, precision: Precision) -> Result<Self, SphericalError> {
        Self::try_from(AngularInterval::of(min, max, precision)?)
    }

    /// Returns the underlying interval.
    #[must_use]
    pub fn as_interval(&self) -> &AngularInterval {
        &self.0
    }

    #[must_use]
    pub fn translate(&self, delta: f64) -> Self {
        Self(self.0.translate(delta))
    }

    #[must_use]
    pub fn reflect(&self) -> Self {
        Self(self.0.reflect())
    }

    pub(crate) fn with_precision(self, precision: Precision) -> Self {
        Self(self.0.with_precision(precision))
    }

    /// Splits the interval by the diameter through `cut`.
    ///
    /// The diameter cuts the circle at the cut azimuth and at its antipode.
    /// A convex interval contains at most one of them in its interior, so
    /// each side receives at most one piece. An interval that lies entirely
    /// on one side is returned unchanged on that side; an interval too small
    /// to be placed on either side yields neither.
    #[must_use]
    pub fn split_diameter(&self, cut: &CutAngle) -> Split<Self> {
        let precision = self.0.precision;
        let plus_start = if cut.positive_facing {
            cut.azimuth
        } else {
            cut.azimuth + PI
        };

        let (min, max) = match self.0.bounds {
            Bounds::Range { min, max } => (min, max),
            Bounds::Empty => return Split::new(None, None),
            Bounds::Full => {
                let plus = AngularInterval::range(plus_start, PI, precision);
                let minus = AngularInterval::range(plus_start + PI, PI, precision);
                return Split::new(Some(Self(minus)), Some(Self(plus)));
            }
        };

        // Crossing `plus_start` going counter-clockwise moves from the minus
        // side to the plus side; crossing its antipode does the reverse.
        for (crossing, lower_is_minus) in [(plus_start, true), (plus_start + PI, false)] {
            let at = angle::normalize_above(crossing, min);
            if precision.gt(at, min) && precision.lt(at, max) {
                let lower = Self(AngularInterval::range(min, at - min, precision));
                let upper = Self(AngularInterval::range(at, max - at, precision));
                return if lower_is_minus {
                    Split::new(Some(lower), Some(upper))
                } else {
                    Split::new(Some(upper), Some(lower))
                };
            }
        }

        match cut.classify(0.5 * (min + max)) {
            HyperplaneLocation::Minus => Split::new(Some(*self), None),
            HyperplaneLocation::Plus => Split::new(None, Some(*self)),
            HyperplaneLocation::On => Split::new(None, None),
        }
    }
}

impl Deref for ConvexInterval {
    type Target = AngularInterval;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<AngularInterval> for ConvexInterval {
    type Error = SphericalError;

    fn try_from(interval: AngularInterval) -> Result<Self, Self::Error> {
        let (min, max) = (
            interval.min().unwrap_or(0.0),
            interval.max().unwrap_or(0.0),
        );
        if interval.is_empty() {
            return Err(GeometryError::InvalidInterval {
                min,
                max,
                reason: "interval is empty",
            }
            .into());
        }
        if !interval.is_convex() {
            return Err(GeometryError::InvalidInterval {
                min,
                max,
                reason: "interval is larger than pi",
            }
            .into());
        }
        Ok(Self(interval))
    }
}

/// An oriented diameter of a circle, given by one of its two azimuths.
///
/// When positive-facing, the half circle running counter-clockwise from
/// the cut azimuth for `pi` radians is the plus side; otherwise that half
/// is the minus side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutAngle {
    azimuth: f64,
    positive_facing: bool,
    precision: Precision,
}

impl CutAngle {
    #[must_use]
    pub fn new(azimuth: f64, positive_facing: bool, precision: Precision) -> Self {
        Self {
            azimuth: angle::normalize_between_zero_and_two_pi(azimuth),
            positive_facing,
            precision,
        }
    }

    /// Returns the cut azimuth in `[0, 2pi)`.
    #[must_use]
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    #[must_use]
    pub fn is_positive_facing(&self) -> bool {
        self.positive_facing
    }

    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Classifies an azimuth against the diameter.
    #[must_use]
    pub fn classify(&self, azimuth: f64) -> HyperplaneLocation {
        let offset = angle::normalize_around(azimuth - self.azimuth, 0.0);
        if self.precision.eq_zero(offset) || self.precision.eq(offset.abs(), PI) {
            return HyperplaneLocation::On;
        }
        if (offset > 0.0) == self.positive_facing {
            HyperplaneLocation::Plus
        } else {
            HyperplaneLocation::Minus
        }
    }
}
