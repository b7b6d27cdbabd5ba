pub mod connect;

pub use connect::{
    connect_maximizing, connect_minimizing, ArcConnector, InteriorAngle, SelectConnection,
};
