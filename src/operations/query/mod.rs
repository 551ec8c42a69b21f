mod contains;

pub use contains::{PointInPolygon, PolygonInPolygon};
