mod connectable;
mod connector;
mod select;

pub use connector::{connect_maximizing, connect_minimizing, ArcConnector};
pub use select::{interior_angle, InteriorAngle, SelectConnection};
