use crate::geometry::{GreatArc, SpherePoint};

slotmap::new_key_type! {
    /// Handle of an arc registered in an [`ArcConnector`](super::ArcConnector).
    pub(crate) struct ArcKey;
}

/// An arc together with the links chosen for it during connection.
#[derive(Debug, Clone)]
pub(crate) struct ConnectableArc {
    pub arc: GreatArc,
    pub start: Option<SpherePoint>,
    pub end: Option<SpherePoint>,
    /// Registration index within the current batch.
    pub order: usize,
    pub next: Option<ArcKey>,
    pub previous: Option<ArcKey>,
    pub exported: bool,
}

impl ConnectableArc {
    pub fn new(arc: GreatArc, order: usize) -> Self {
        Self {
            arc,
            start: arc.start_point(),
            end: arc.end_point(),
            order,
            next: None,
            previous: None,
            exported: false,
        }
    }

    /// Returns `true` if `candidate` starts where this arc ends, under the
    /// candidate's precision.
    pub fn can_connect_to(&self, candidate: &Self) -> bool {
        match (self.end, candidate.start) {
            (Some(end), Some(start)) => start.eq(&end, candidate.arc.precision()),
            _ => false,
        }
    }

    /// Returns the distance between this arc's end and `candidate`'s end if
    /// they coincide under this arc's precision.
    ///
    /// A candidate ending where this arc ends is a point-like connection.
    pub fn point_like_distance(&self, candidate: &Self) -> Option<f64> {
        let (end, other) = (self.end?, candidate.end?);
        let distance = end.distance(&other);
        self.arc.precision().eq_zero(distance).then_some(distance)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::GreatCircle;
    use crate::math::{Precision, Vector3};
    use std::f64::consts::FRAC_PI_2;

    fn arc(start: SpherePoint, end: SpherePoint, epsilon: f64) -> ConnectableArc {
        let arc = GreatArc::from_points(&start, &end, Precision::new(epsilon)).unwrap();
        ConnectableArc::new(arc, 0)
    }

    #[test]
    fn connects_under_candidate_precision() {
        let near_j = SpherePoint::from_azimuth_polar(FRAC_PI_2 + 1e-4, FRAC_PI_2);
        let incoming = arc(SpherePoint::PLUS_I, SpherePoint::PLUS_J, 1e-10);
        let fine = arc(near_j, SpherePoint::PLUS_K, 1e-10);
        let coarse = arc(near_j, SpherePoint::PLUS_K, 1e-2);

        assert!(!incoming.can_connect_to(&fine));
        assert!(incoming.can_connect_to(&coarse));
    }

    #[test]
    fn full_arcs_never_connect() {
        let full = GreatCircle::from_pole(&Vector3::z(), Precision::default())
            .unwrap()
            .span();
        let full = ConnectableArc::new(full, 0);
        let other = arc(SpherePoint::PLUS_I, SpherePoint::PLUS_J, 1e-10);

        assert!(full.start.is_none() && full.end.is_none());
        assert!(!full.can_connect_to(&other));
        assert!(!other.can_connect_to(&full));
        assert!(full.point_like_distance(&other).is_none());
    }

    #[test]
    fn point_like_distance_uses_incoming_precision() {
        let incoming = arc(SpherePoint::PLUS_I, SpherePoint::PLUS_J, 1e-1);
        let near = arc(
            SpherePoint::PLUS_J,
            SpherePoint::from_azimuth_polar(FRAC_PI_2, 1.55),
            1e-10,
        );
        let far = arc(SpherePoint::PLUS_J, SpherePoint::PLUS_K, 1e-10);

        let d = incoming.point_like_distance(&near).unwrap();
        assert!((d - (FRAC_PI_2 - 1.55)).abs() < 1e-9);
        assert!(incoming.point_like_distance(&far).is_none());
    }
}
