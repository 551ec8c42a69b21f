use crate::geometry::Polygon;
use crate::math::polygon_2d::{classify_point, Containment};
use crate::math::Point;

/// Classifies a point against a polygon: inside, outside or on the boundary.
pub struct PointInPolygon<'a> {
    polygon: &'a Polygon,
    point: Point,
}

impl<'a> PointInPolygon<'a> {
    /// Creates a new `PointInPolygon` query.
    #[must_use]
    pub fn new(polygon: &'a Polygon, point: Point) -> Self {
        Self { polygon, point }
    }

    /// Executes the query.
    ///
    /// Boundary hits are detected exactly with the orientation predicate;
    /// everything else uses a half-open crossing count, so the winding of
    /// the polygon does not matter.
    #[must_use]
    pub fn execute(&self) -> Containment {
        classify_point(self.polygon.points(), self.point)
    }
}

/// Tests whether every vertex of `inner` lies inside or on `outer`.
///
/// Edges of `inner` may still cross `outer` when `outer` is not convex.
pub struct PolygonInPolygon<'a> {
    outer: &'a Polygon,
    inner: &'a Polygon,
}

impl<'a> PolygonInPolygon<'a> {
    /// Creates a new `PolygonInPolygon` query.
    #[must_use]
    pub fn new(outer: &'a Polygon, inner: &'a Polygon) -> Self {
        Self { outer, inner }
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> bool {
        !self.inner.is_empty()
            && self
                .inner
                .points()
                .iter()
                .all(|&p| PointInPolygon::new(self.outer, p).execute().is_covered())
    }
}
