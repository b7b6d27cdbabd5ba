pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod path;

pub use error::{Result, SphericalError};
pub use path::{ArcPath, ArcPathBuilder};
