pub mod bounds;
pub mod line;
pub mod path;
pub mod polygon;
pub mod polygon_set;
pub mod transform;

pub use bounds::Bounds;
pub use line::{Intersection, Line, Segment};
pub use path::{Path, PathBuilder};
pub use polygon::{Polygon, PolygonBuilder};
pub use polygon_set::PolygonSet;
pub use transform::{MirrorPlane, Transform2};
