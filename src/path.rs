use std::collections::VecDeque;
use std::fmt;

use crate::error::{PathError, Result};
use crate::geometry::{GreatArc, SpherePoint, Transform2S};
use crate::math::Precision;

/// An ordered sequence of connected great arcs.
///
/// Each arc starts where the previous one ends, within the precision of
/// the later arc. The path is closed when the last arc ends where the first
/// one starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcPath {
    arcs: Vec<GreatArc>,
}

impl ArcPath {
    /// Returns a path with no arcs.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a path from arcs that are already known to be connected.
    pub(crate) fn from_connected(arcs: Vec<GreatArc>) -> Self {
        Self { arcs }
    }

    /// Creates a path from a sequence of arcs.
    ///
    /// # Errors
    ///
    /// Returns an error if an arc does not start where the previous arc
    /// ends. Full arcs have no endpoints and can only form a path alone.
    pub fn from_arcs(arcs: Vec<GreatArc>) -> Result<Self> {
        for (index, pair) in arcs.windows(2).enumerate() {
            if !connects(&pair[0], &pair[1]) {
                return Err(PathError::NotConnected { index: index + 1 }.into());
            }
        }
        Ok(Self { arcs })
    }

    /// Creates a path through the given vertices, optionally closing it back
    /// to the first vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 vertices are given, or if two
    /// consecutive vertices are equal or antipodal within `precision`.
    pub fn from_vertices(
        vertices: &[SpherePoint],
        close: bool,
        precision: Precision,
    ) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(PathError::TooFewVertices {
                count: vertices.len(),
            }
            .into());
        }

        let mut builder = ArcPathBuilder::new(precision);
        for vertex in vertices {
            builder.append_vertex(*vertex)?;
        }
        if close {
            builder.close()?;
        }
        builder.build()
    }

    /// Creates a closed path through the given vertices.
    ///
    /// # Errors
    ///
    /// Same as [`ArcPath::from_vertices`].
    pub fn from_vertex_loop(vertices: &[SpherePoint], precision: Precision) -> Result<Self> {
        Self::from_vertices(vertices, true, precision)
    }

    #[must_use]
    pub fn arcs(&self) -> &[GreatArc] {
        &self.arcs
    }

    #[must_use]
    pub fn into_arcs(self) -> Vec<GreatArc> {
        self.arcs
    }

    /// Returns the number of arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    #[must_use]
    pub fn start_arc(&self) -> Option<&GreatArc> {
        self.arcs.first()
    }

    #[must_use]
    pub fn end_arc(&self) -> Option<&GreatArc> {
        self.arcs.last()
    }

    #[must_use]
    pub fn start_vertex(&self) -> Option<SpherePoint> {
        self.start_arc().and_then(GreatArc::start_point)
    }

    #[must_use]
    pub fn end_vertex(&self) -> Option<SpherePoint> {
        self.end_arc().and_then(GreatArc::end_point)
    }

    /// Returns `true` if the path ends where it starts.
    ///
    /// A path made of a single full arc has no endpoints and is not closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.start_vertex(), self.end_vertex(), self.end_arc()) {
            (Some(start), Some(end), Some(arc)) => start.eq(&end, arc.precision()),
            _ => false,
        }
    }

    /// Returns the vertex sequence: the first arc's start followed by every
    /// arc's end.
    ///
    /// A closed path repeats its first vertex at the end. A path made of a
    /// full arc has no vertices.
    #[must_use]
    pub fn vertices(&self) -> Vec<SpherePoint> {
        let Some(start) = self.start_vertex() else {
            return Vec::new();
        };
        let mut vertices = Vec::with_capacity(self.arcs.len() + 1);
        vertices.push(start);
        vertices.extend(self.arcs.iter().filter_map(GreatArc::end_point));
        vertices
    }

    /// Returns the vertices without the repeated closing vertex of a
    /// closed path.
    #[must_use]
    pub fn distinct_vertices(&self) -> Vec<SpherePoint> {
        let mut vertices = self.vertices();
        if self.is_closed() {
            vertices.pop();
        }
        vertices
    }

    /// Returns the total angular length of the path.
    #[must_use]
    pub fn size(&self) -> f64 {
        self.arcs.iter().map(GreatArc::size).sum()
    }

    /// Returns the path traversed in the opposite direction.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            arcs: self.arcs.iter().rev().map(GreatArc::reverse).collect(),
        }
    }

    /// Applies an isometry of the sphere to every arc.
    #[must_use]
    pub fn transform(&self, transform: &Transform2S) -> Self {
        Self {
            arcs: self.arcs.iter().map(|arc| arc.transform(transform)).collect(),
        }
    }
}

impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArcPath[")?;
        for (i, vertex) in self.vertices().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{vertex}")?;
        }
        if self.is_closed() {
            write!(f, "; closed")?;
        }
        write!(f, "]")
    }
}

/// Returns `true` if `next` starts where `previous` ends, under the
/// precision of `next`.
fn connects(previous: &GreatArc, next: &GreatArc) -> bool {
    match (previous.end_point(), next.start_point()) {
        (Some(end), Some(start)) => end.eq(&start, next.precision()),
        _ => false,
    }
}

/// Incrementally builds an [`ArcPath`] from arcs and vertices.
#[derive(Debug, Clone)]
pub struct ArcPathBuilder {
    precision: Precision,
    arcs: VecDeque<GreatArc>,
    /// A lone vertex added before any arc existed.
    pending: Option<SpherePoint>,
}

impl ArcPathBuilder {
    /// Creates a builder; `precision` is used for arcs created from vertices.
    #[must_use]
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            arcs: VecDeque::new(),
            pending: None,
        }
    }

    /// Appends an arc to the end of the path.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc does not start at the current end vertex.
    pub fn append(&mut self, arc: GreatArc) -> Result<&mut Self> {
        if let Some(last) = self.arcs.back() {
            if !connects(last, &arc) {
                return Err(PathError::NotConnected {
                    index: self.arcs.len(),
                }
                .into());
            }
        }
        self.arcs.push_back(arc);
        Ok(self)
    }

    /// Prepends an arc to the start of the path.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc does not end at the current start vertex.
    pub fn prepend(&mut self, arc: GreatArc) -> Result<&mut Self> {
        if let Some(first) = self.arcs.front() {
            if !connects(&arc, first) {
                return Err(PathError::NotConnected { index: 1 }.into());
            }
        }
        self.arcs.push_front(arc);
        Ok(self)
    }

    /// Appends an arc from the current end vertex to `vertex`.
    ///
    /// # Errors
    ///
    /// Returns an error if `vertex` is equal or antipodal to the current end
    /// vertex, or if the path ends in a full arc.
    pub fn append_vertex(&mut self, vertex: SpherePoint) -> Result<&mut Self> {
        let end = match self.arcs.back() {
            Some(last) => last.end_point(),
            None => self.pending,
        };
        match end {
            Some(end) => {
                let arc = GreatArc::from_points(&end, &vertex, self.precision)?;
                self.pending = None;
                self.append(arc)
            }
            None if self.arcs.is_empty() => {
                self.pending = Some(vertex);
                Ok(self)
            }
            None => Err(PathError::NotConnected {
                index: self.arcs.len(),
            }
            .into()),
        }
    }

    /// Prepends an arc from `vertex` to the current start vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if `vertex` is equal or antipodal to the current
    /// start vertex, or if the path starts with a full arc.
    pub fn prepend_vertex(&mut self, vertex: SpherePoint) -> Result<&mut Self> {
        let start = match self.arcs.front() {
            Some(first) => first.start_point(),
            None => self.pending,
        };
        match start {
            Some(start) => {
                let arc = GreatArc::from_points(&vertex, &start, self.precision)?;
                self.pending = None;
                self.prepend(arc)
            }
            None if self.arcs.is_empty() => {
                self.pending = Some(vertex);
                Ok(self)
            }
            None => Err(PathError::NotConnected { index: 1 }.into()),
        }
    }

    /// Closes the path with an arc from the end vertex back to the start
    /// vertex, unless they already coincide.
    ///
    /// # Errors
    ///
    /// Returns an error if the closing arc would be degenerate (start and end
    /// antipodal).
    pub fn close(&mut self) -> Result<&mut Self> {
        let (Some(first), Some(last)) = (self.arcs.front(), self.arcs.back()) else {
            return Ok(self);
        };
        if let (Some(start), Some(end)) = (first.start_point(), last.end_point()) {
            if !end.eq(&start, last.precision()) {
                self.append_vertex(start)?;
            }
        }
        Ok(self)
    }

    /// Builds the path.
    ///
    /// # Errors
    ///
    /// Returns an error if only a single vertex was added.
    pub fn build(&mut self) -> Result<ArcPath> {
        if self.pending.is_some() {
            return Err(PathError::TooFewVertices { count: 1 }.into());
        }
        Ok(ArcPath {
            arcs: self.arcs.drain(..).collect(),
        })
    }
}
