use thiserror::Error;

/// Top-level error type for spherical arc and path operations.
#[derive(Debug, Error)]
pub enum SphericalError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

/// Errors related to geometric construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("invalid angular interval [{min}, {max}]: {reason}")]
    InvalidInterval {
        min: f64,
        max: f64,
        reason: &'static str,
    },
}

/// Errors related to building arc paths.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("arc {index} does not start where the previous arc ends")]
    NotConnected { index: usize },

    #[error("a path needs at least 2 vertices, got {count}")]
    TooFewVertices { count: usize },
}

/// Internal invariant violations raised by the arc connector.
///
/// These signal a defect in the connector or in a selection policy, never
/// an ordinary open path end.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("selection policy returned no usable arc out of {candidates} candidates")]
    NoSelection { candidates: usize },

    #[error("{registered} arcs were registered but only {exported} were exported into paths")]
    ArcsDropped { registered: usize, exported: usize },
}

/// Convenience type alias for results using [`SphericalError`].
pub type Result<T> = std::result::Result<T, SphericalError>;
