use std::f64::consts::PI;

use crate::geometry::GreatArc;

/// Chooses the successor of an arc when several arcs start at its end point.
///
/// Implemented for [`InteriorAngle`] and for any
/// `Fn(&GreatArc, &[&GreatArc]) -> Option<usize>`.
pub trait SelectConnection {
    /// Returns the index into `candidates` of the arc that should follow
    /// `incoming`.
    ///
    /// Candidates are given in registration order and always number at least
    /// two. Returning `None` (or an out-of-range index) makes the connector
    /// fail with [`ConnectorError::NoSelection`](crate::error::ConnectorError).
    fn select(&self, incoming: &GreatArc, candidates: &[&GreatArc]) -> Option<usize>;
}

impl<F> SelectConnection for F
where
    F: Fn(&GreatArc, &[&GreatArc]) -> Option<usize>,
{
    fn select(&self, incoming: &GreatArc, candidates: &[&GreatArc]) -> Option<usize> {
        self(incoming, candidates)
    }
}

/// Selection by the interior angle formed at the shared vertex.
///
/// Candidates whose angles are equal within the incoming arc's precision
/// resolve to the one registered first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteriorAngle {
    /// Take the largest interior angle, following the outermost boundary.
    #[default]
    Maximize,
    /// Take the smallest interior angle, closing the tightest loop.
    Minimize,
}

impl SelectConnection for InteriorAngle {
    fn select(&self, incoming: &GreatArc, candidates: &[&GreatArc]) -> Option<usize> {
        let precision = incoming.precision();
        let mut best: Option<(usize, f64)> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            let Some(angle) = interior_angle(incoming, candidate) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((_, best_angle)) => match self {
                    Self::Maximize => precision.gt(angle, best_angle),
                    Self::Minimize => precision.lt(angle, best_angle),
                },
            };
            if better {
                best = Some((index, angle));
            }
        }

        best.map(|(index, _)| index)
    }
}

/// Returns the interior angle at the end of `incoming` when the path
/// continues along `outgoing`, in `[0, 2pi)`.
///
/// This is the angle swept counter-clockwise (seen from outside the sphere)
/// from `outgoing`'s direction to the reverse of `incoming`'s direction, so a
/// straight continuation measures `pi` and a left turn less than `pi`.
/// Returns `None` if `incoming` is a full arc.
#[must_use]
pub fn interior_angle(incoming: &GreatArc, outgoing: &GreatArc) -> Option<f64> {
    let at = incoming.end_point()?;
    Some(PI - incoming.circle().signed_angle(outgoing.circle(), &at))
}
