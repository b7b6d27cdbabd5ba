mod great_arc;
mod great_circle;
mod interval;
mod point;
mod split;
mod transform;

pub use great_arc::GreatArc;
pub use great_circle::GreatCircle;
pub use interval::{AngularInterval, ConvexInterval, CutAngle};
pub use point::SpherePoint;
pub use split::{Split, SplitLocation};
pub use transform::Transform2S;

/// Location of a point relative to a bounded region (an arc or interval).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionLocation {
    Inside,
    Outside,
    Boundary,
}

/// Location of a point relative to an oriented hyperplane.
///
/// For a great circle the minus side is the hemisphere containing the pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HyperplaneLocation {
    Minus,
    Plus,
    On,
}
