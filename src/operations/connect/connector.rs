use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::error::{ConnectorError, Result};
use crate::geometry::GreatArc;
use crate::path::ArcPath;

use super::connectable::{ArcKey, ConnectableArc};
use super::select::{InteriorAngle, SelectConnection};

/// Slack added to the polar search window around an end point.
const WINDOW_MARGIN: f64 = 1e-12;

/// Connects great arcs end-to-start into [`ArcPath`]s.
///
/// Arcs are registered with [`add`](Self::add) or [`connect`](Self::connect)
/// and assembled by [`connect_all`](Self::connect_all), which also clears the
/// connector for reuse. Where several arcs start at the end of another, the
/// selector `S` decides which one follows.
///
/// # Examples
///
/// ```
/// use spherical_paths::geometry::{GreatArc, SpherePoint};
/// use spherical_paths::math::Precision;
/// use spherical_paths::operations::ArcConnector;
///
/// let precision = Precision::default();
/// let arcs = [
///     (SpherePoint::PLUS_J, SpherePoint::PLUS_K),
///     (SpherePoint::PLUS_I, SpherePoint::PLUS_J),
///     (SpherePoint::PLUS_K, SpherePoint::PLUS_I),
/// ]
/// .map(|(a, b)| GreatArc::from_points(&a, &b, precision).unwrap());
///
/// let paths = ArcConnector::maximize().connect_all_with(arcs).unwrap();
/// assert_eq!(paths.len(), 1);
/// assert!(paths[0].is_closed());
/// ```
#[derive(Debug)]
pub struct ArcConnector<S = InteriorAngle> {
    arcs: SlotMap<ArcKey, ConnectableArc>,
    /// Keys in registration order.
    order: Vec<ArcKey>,
    /// Arcs with a start point, sorted by the polar angle of that point.
    by_polar: Vec<(f64, ArcKey)>,
    /// Largest epsilon among registered arcs; bounds the candidate search.
    max_epsilon: f64,
    selector: S,
}

impl ArcConnector<InteriorAngle> {
    /// Creates a connector that keeps to the largest interior angle.
    #[must_use]
    pub fn maximize() -> Self {
        Self::new(InteriorAngle::Maximize)
    }

    /// Creates a connector that keeps to the smallest interior angle.
    #[must_use]
    pub fn minimize() -> Self {
        Self::new(InteriorAngle::Minimize)
    }
}

impl Default for ArcConnector<InteriorAngle> {
    fn default() -> Self {
        Self::maximize()
    }
}

impl<S: SelectConnection> ArcConnector<S> {
    /// Creates an empty connector using `selector` for ambiguous vertices.
    pub fn new(selector: S) -> Self {
        Self {
            arcs: SlotMap::with_key(),
            order: Vec::new(),
            by_polar: Vec::new(),
            max_epsilon: 0.0,
            selector,
        }
    }

    #[must_use]
    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Returns the number of registered arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registers an arc without linking it.
    pub fn add(&mut self, arc: GreatArc) {
        self.register(arc);
    }

    /// Registers arcs without linking them.
    pub fn add_all(&mut self, arcs: impl IntoIterator<Item = GreatArc>) {
        for arc in arcs {
            self.register(arc);
        }
    }

    /// Registers arcs and links them right away, to each other and to arcs
    /// registered earlier.
    ///
    /// Links made here are kept by later calls, so connecting in batches can
    /// give different paths than a single [`connect_all`](Self::connect_all).
    ///
    /// # Errors
    ///
    /// Returns an error if the selector fails to pick a successor.
    pub fn connect(&mut self, arcs: impl IntoIterator<Item = GreatArc>) -> Result<()> {
        let keys: Vec<ArcKey> = arcs.into_iter().map(|arc| self.register(arc)).collect();
        for key in keys {
            self.follow_forward(key)?;
        }
        Ok(())
    }

    /// Links every registered arc and returns the resulting paths.
    ///
    /// Paths appear in the registration order of their first arc. A closed
    /// path starts at its earliest registered arc. The connector is empty
    /// afterwards, also when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector fails to pick a successor, or if an
    /// arc would be missing from the output.
    pub fn connect_all(&mut self) -> Result<Vec<ArcPath>> {
        let result = self.link_and_export();
        self.reset();
        result
    }

    /// Registers `arcs`, then behaves like [`connect_all`](Self::connect_all).
    ///
    /// # Errors
    ///
    /// Same as [`connect_all`](Self::connect_all).
    pub fn connect_all_with(
        &mut self,
        arcs: impl IntoIterator<Item = GreatArc>,
    ) -> Result<Vec<ArcPath>> {
        self.add_all(arcs);
        self.connect_all()
    }

    /// Drops all registered arcs and links.
    pub fn reset(&mut self) {
        self.arcs.clear();
        self.order.clear();
        self.by_polar.clear();
        self.max_epsilon = 0.0;
    }

    fn register(&mut self, arc: GreatArc) -> ArcKey {
        let entry = ConnectableArc::new(arc, self.order.len());
        let start = entry.start;
        self.max_epsilon = self.max_epsilon.max(arc.precision().epsilon());

        let key = self.arcs.insert(entry);
        self.order.push(key);
        if let Some(start) = start {
            let polar = start.polar();
            let at = self.by_polar.partition_point(|(p, _)| *p <= polar);
            self.by_polar.insert(at, (polar, key));
        }
        key
    }

    fn link_and_export(&mut self) -> Result<Vec<ArcPath>> {
        for i in 0..self.order.len() {
            let key = self.order[i];
            self.follow_forward(key)?;
        }

        let paths = self.export_paths();
        let registered = self.order.len();
        let exported: usize = paths.iter().map(ArcPath::len).sum();
        if exported != registered {
            warn!(registered, exported, "arcs missing from connected paths");
            return Err(ConnectorError::ArcsDropped {
                registered,
                exported,
            }
            .into());
        }

        debug!(arcs = registered, paths = paths.len(), "connected arcs into paths");
        Ok(paths)
    }

    /// Links arcs one after another starting at `start` until the chain ends
    /// or reaches an arc that is already linked.
    fn follow_forward(&mut self, start: ArcKey) -> Result<()> {
        let mut current = start;
        loop {
            let entry = &self.arcs[current];
            if entry.next.is_some() || entry.end.is_none() {
                return Ok(());
            }
            let Some(next) = self.find_connection(current)? else {
                return Ok(());
            };
            self.arcs[current].next = Some(next);
            self.arcs[next].previous = Some(current);
            current = next;
        }
    }

    fn find_connection(&self, key: ArcKey) -> Result<Option<ArcKey>> {
        let candidates = self.candidates(key);
        let incoming = &self.arcs[key];

        let (chosen, point_like) = match candidates.as_slice() {
            [] => return Ok(None),
            [only] => (*only, false),
            _ => {
                if let Some(nearest) = self.nearest_point_like(incoming, &candidates) {
                    (nearest, true)
                } else {
                    let arcs: Vec<&GreatArc> =
                        candidates.iter().map(|k| &self.arcs[*k].arc).collect();
                    match self.selector.select(&incoming.arc, &arcs) {
                        Some(index) if index < candidates.len() => (candidates[index], false),
                        _ => {
                            warn!(
                                incoming = incoming.order,
                                candidates = candidates.len(),
                                "no connection selected"
                            );
                            return Err(ConnectorError::NoSelection {
                                candidates: candidates.len(),
                            }
                            .into());
                        }
                    }
                }
            }
        };

        trace!(
            incoming = incoming.order,
            candidates = candidates.len(),
            chosen = self.arcs[chosen].order,
            point_like,
            "connected arc"
        );
        Ok(Some(chosen))
    }

    /// Returns the unlinked arcs starting at the end of `key`, in
    /// registration order.
    fn candidates(&self, key: ArcKey) -> Vec<ArcKey> {
        let incoming = &self.arcs[key];
        let Some(end) = incoming.end else {
            return Vec::new();
        };

        // Matching points are never further apart in polar angle than in
        // distance, so only this window of `by_polar` needs checking.
        let polar = end.polar();
        let window = self.max_epsilon + WINDOW_MARGIN;
        let lo = self.by_polar.partition_point(|(p, _)| *p < polar - window);
        let hi = self.by_polar.partition_point(|(p, _)| *p <= polar + window);

        let mut candidates: Vec<ArcKey> = self.by_polar[lo..hi]
            .iter()
            .map(|(_, k)| *k)
            .filter(|k| {
                let candidate = &self.arcs[*k];
                *k != key && candidate.previous.is_none() && incoming.can_connect_to(candidate)
            })
            .collect();
        candidates.sort_by_key(|k| self.arcs[*k].order);
        candidates
    }

    /// Among candidates that also end where `incoming` ends, returns the one
    /// whose end is nearest. Ties go to the earlier registered candidate.
    fn nearest_point_like(
        &self,
        incoming: &ConnectableArc,
        candidates: &[ArcKey],
    ) -> Option<ArcKey> {
        let mut best: Option<(ArcKey, f64)> = None;
        for &key in candidates {
            let candidate = &self.arcs[key];
            let Some(distance) = incoming.point_like_distance(candidate) else {
                continue;
            };
            let precision = incoming.arc.precision().tighter(candidate.arc.precision());
            match best {
                Some((_, best_distance)) if !precision.lt(distance, best_distance) => {}
                _ => best = Some((key, distance)),
            }
        }
        best.map(|(key, _)| key)
    }

    fn export_paths(&mut self) -> Vec<ArcPath> {
        let mut paths = Vec::new();
        for i in 0..self.order.len() {
            let key = self.order[i];
            if !self.arcs[key].exported {
                paths.push(self.export_path(key));
            }
        }
        paths
    }

    /// Exports the path containing `key`, starting from its root, or from
    /// `key` itself if the path is closed.
    fn export_path(&mut self, key: ArcKey) -> ArcPath {
        let mut root = key;
        while let Some(previous) = self.arcs[root].previous {
            if previous == key {
                root = key;
                break;
            }
            root = previous;
        }

        let mut arcs = Vec::new();
        let mut current = Some(root);
        while let Some(k) = current {
            let entry = &mut self.arcs[k];
            if entry.exported {
                break;
            }
            entry.exported = true;
            arcs.push(entry.arc);
            current = entry.next;
        }
        ArcPath::from_connected(arcs)
    }
}

/// Connects `arcs` preferring the largest interior angle at shared vertices.
///
/// # Errors
///
/// Same as [`ArcConnector::connect_all`].
pub fn connect_maximizing(arcs: impl IntoIterator<Item = GreatArc>) -> Result<Vec<ArcPath>> {
    ArcConnector::maximize().connect_all_with(arcs)
}

/// Connects `arcs` preferring the smallest interior angle at shared vertices.
///
/// # Errors
///
/// Same as [`ArcConnector::connect_all`].
pub fn connect_minimizing(arcs: impl IntoIterator<Item = GreatArc>) -> Result<Vec<ArcPath>> {
    ArcConnector::minimize().connect_all_with(arcs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{GreatCircle, SpherePoint};
    use crate::math::{Precision, Vector3};

    fn arc(start: SpherePoint, end: SpherePoint) -> GreatArc {
        GreatArc::from_points(&start, &end, Precision::default()).unwrap()
    }

    fn never(_: &GreatArc, _: &[&GreatArc]) -> Option<usize> {
        None
    }

    #[test]
    fn empty_input_gives_no_paths() {
        let mut connector = ArcConnector::maximize();
        assert!(connector.connect_all().unwrap().is_empty());
    }

    #[test]
    fn single_arc_gives_single_path() {
        let paths = connect_maximizing([arc(SpherePoint::PLUS_I, SpherePoint::PLUS_J)]).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 1);
        assert!(!paths[0].is_closed());
    }

    #[test]
    fn add_registers_without_linking() {
        let mut connector = ArcConnector::default();
        connector.add(arc(SpherePoint::PLUS_J, SpherePoint::PLUS_K));
        connector.add_all([arc(SpherePoint::PLUS_I, SpherePoint::PLUS_J)]);
        assert_eq!(connector.len(), 2);
        assert!(connector.arcs.values().all(|e| e.next.is_none()));

        let paths = connector.connect_all().unwrap();
        assert_eq!(paths.len(), 1);
        assert!(connector.is_empty());
    }

    #[test]
    fn connect_links_immediately() {
        let mut connector = ArcConnector::maximize();
        connector
            .connect([
                arc(SpherePoint::PLUS_J, SpherePoint::PLUS_K),
                arc(SpherePoint::PLUS_I, SpherePoint::PLUS_J),
            ])
            .unwrap();
        let linked = connector.arcs.values().filter(|e| e.next.is_some()).count();
        assert_eq!(linked, 1);
    }

    #[test]
    fn full_arc_stays_alone() {
        let full = GreatCircle::from_pole(&Vector3::z(), Precision::default())
            .unwrap()
            .span();
        let paths = connect_maximizing([
            arc(SpherePoint::PLUS_I, SpherePoint::PLUS_J),
            full,
            arc(SpherePoint::PLUS_J, SpherePoint::MINUS_I),
        ])
        .unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].len(), 2);
        assert!(paths[1].start_arc().unwrap().is_full());
    }

    #[test]
    fn failing_selector_resets_connector() {
        let mut connector = ArcConnector::new(never);
        connector.add_all([
            arc(SpherePoint::PLUS_I, SpherePoint::PLUS_J),
            arc(SpherePoint::PLUS_J, SpherePoint::PLUS_K),
            arc(SpherePoint::PLUS_J, SpherePoint::MINUS_K),
        ]);
        let err = connector.connect_all().unwrap_err();
        assert!(matches!(
            err,
            crate::error::SphericalError::Connector(ConnectorError::NoSelection { candidates: 2 })
        ));
        assert!(connector.is_empty());
    }

    #[test]
    fn out_of_range_selection_is_an_error() {
        fn too_far(_: &GreatArc, candidates: &[&GreatArc]) -> Option<usize> {
            (!candidates.is_empty()).then_some(candidates.len())
        }
        let mut connector = ArcConnector::new(too_far);
        let result = connector.connect([
            arc(SpherePoint::PLUS_I, SpherePoint::PLUS_J),
            arc(SpherePoint::PLUS_J, SpherePoint::PLUS_K),
            arc(SpherePoint::PLUS_J, SpherePoint::MINUS_K),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn candidates_follow_registration_order() {
        let mut connector = ArcConnector::maximize();
        connector.add_all([
            arc(SpherePoint::PLUS_J, SpherePoint::MINUS_K),
            arc(SpherePoint::PLUS_I, SpherePoint::PLUS_J),
            arc(SpherePoint::PLUS_J, SpherePoint::PLUS_K),
            arc(SpherePoint::PLUS_J, SpherePoint::MINUS_I),
        ]);
        let incoming = connector.order[1];
        let orders: Vec<usize> = connector
            .candidates(incoming)
            .iter()
            .map(|k| connector.arcs[*k].order)
            .collect();
        assert_eq!(orders, vec![0, 2, 3]);
    }
}
