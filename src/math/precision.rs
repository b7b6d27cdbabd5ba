use std::cmp::Ordering;

use super::TOLERANCE;

/// Tolerance-aware comparison of real numbers.
///
/// Two values compare equal when they differ by no more than `epsilon`.
/// Every geometric predicate in the crate goes through a `Precision`;
/// each circle and arc carries its own copy, so objects built with
/// different tolerances can be mixed freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precision {
    epsilon: f64,
}

impl Precision {
    /// Creates a precision context with the given epsilon.
    ///
    /// Negative values are taken by magnitude.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    /// Returns the configured epsilon.
    #[must_use]
    pub fn epsilon(self) -> f64 {
        self.epsilon
    }

    /// Compares two values, treating them as equal within epsilon.
    #[must_use]
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        if (a - b).abs() <= self.epsilon {
            Ordering::Equal
        } else {
            a.total_cmp(&b)
        }
    }

    /// Returns `true` if `a` and `b` are equivalent.
    #[must_use]
    pub fn eq(self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// Returns `true` if `a` is equivalent to zero.
    #[must_use]
    pub fn eq_zero(self, a: f64) -> bool {
        self.eq(a, 0.0)
    }

    /// Returns `true` if `a` is strictly less than `b` beyond epsilon.
    #[must_use]
    pub fn lt(self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Returns `true` if `a` is less than or equivalent to `b`.
    #[must_use]
    pub fn lte(self, a: f64, b: f64) -> bool {
        self.compare(a, b) != Ordering::Greater
    }

    /// Returns `true` if `a` is strictly greater than `b` beyond epsilon.
    #[must_use]
    pub fn gt(self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    /// Returns `true` if `a` is greater than or equivalent to `b`.
    #[must_use]
    pub fn gte(self, a: f64, b: f64) -> bool {
        self.compare(a, b) != Ordering::Less
    }

    /// Returns `-1.0`, `0.0` or `1.0`; values within epsilon of zero give `0.0`.
    #[must_use]
    pub fn signum(self, a: f64) -> f64 {
        match self.compare(a, 0.0) {
            Ordering::Less => -1.0,
            Ordering::Equal => 0.0,
            Ordering::Greater => 1.0,
        }
    }

    /// Returns whichever of the two contexts has the smaller epsilon.
    #[must_use]
    pub fn tighter(self, other: Self) -> Self {
        if other.epsilon < self.epsilon {
            other
        } else {
            self
        }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::new(TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_band_is_inclusive() {
        let p = Precision::new(0.5);
        assert!(p.eq(1.0, 1.5));
        assert!(p.eq(1.0, 0.5));
        assert!(!p.eq(1.0, 1.5625));
        assert!(!p.eq(1.0, 0.4375));
        assert!(p.eq_zero(-0.5));

        let p = Precision::new(1e-3);
        assert!(p.eq(1.0, 0.9995));
        assert!(!p.eq(1.0, 0.9989));
    }

    #[test]
    fn ordering_outside_band() {
        let p = Precision::new(0.1);
        assert_eq!(p.compare(1.0, 1.05), Ordering::Equal);
        assert_eq!(p.compare(1.0, 1.2), Ordering::Less);
        assert_eq!(p.compare(1.2, 1.0), Ordering::Greater);
        assert!(p.lt(1.0, 1.2));
        assert!(!p.lt(1.0, 1.05));
        assert!(p.lte(1.0, 1.05));
        assert!(p.gt(2.0, 1.0));
        assert!(p.gte(1.0, 1.05));
    }

    #[test]
    fn signum_collapses_small_values() {
        let p = Precision::new(1e-6);
        assert!(p.signum(1e-7).abs() < f64::EPSILON);
        assert!((p.signum(-0.5) + 1.0).abs() < f64::EPSILON);
        assert!((p.signum(0.5) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_epsilon_is_taken_by_magnitude() {
        assert!((Precision::new(-1e-4).epsilon() - 1e-4).abs() < f64::EPSILON);
    }

    #[test]
    fn tighter_picks_smaller_epsilon() {
        let coarse = Precision::new(1e-2);
        let fine = Precision::new(1e-8);
        assert_eq!(coarse.tighter(fine), fine);
        assert_eq!(fine.tighter(coarse), fine);
    }

    #[test]
    fn default_uses_crate_tolerance() {
        assert!((Precision::default().epsilon() - TOLERANCE).abs() < f64::EPSILON);
    }
}
