use crate::error::Result;
use crate::math::polygon_2d::winding_number;
use crate::math::Point;
use crate::operations::boolean::{Boolean, BooleanOp};

use super::{Bounds, Polygon, Transform2};

/// Ordered collection of polygons interpreted under the non-zero fill rule.
///
/// Booleans return sets; emitters iterate them in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonSet {
    polygons: Vec<Polygon>,
}

impl PolygonSet {
    #[must_use]
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn push(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[must_use]
    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        self.polygons
            .iter()
            .filter_map(Polygon::bounds)
            .reduce(Bounds::union)
    }

    /// Sum of signed areas. Holes wound opposite to their outer ring subtract.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.polygons.iter().map(Polygon::signed_area).sum()
    }

    /// Non-zero rule membership: the summed winding number is non-zero.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.polygons
            .iter()
            .map(|poly| winding_number(poly.points(), point))
            .sum::<i32>()
            != 0
    }

    /// Every member canonicalised and the set sorted by first vertex.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let mut polygons: Vec<Polygon> = self.polygons.iter().map(Polygon::canonical).collect();
        polygons.sort_by(|a, b| {
            let ka = a.points().first().map(|p| (p.x, p.y));
            let kb = b.points().first().map(|p| (p.x, p.y));
            ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
        });
        Self::new(polygons)
    }

    /// # Errors
    ///
    /// See [`Boolean::execute`].
    pub fn union(&self, other: &Self) -> Result<Self> {
        Boolean::new(BooleanOp::Union, self.clone(), other.clone()).execute()
    }

    /// # Errors
    ///
    /// See [`Boolean::execute`].
    pub fn intersection(&self, other: &Self) -> Result<Self> {
        Boolean::new(BooleanOp::Intersection, self.clone(), other.clone()).execute()
    }

    /// # Errors
    ///
    /// See [`Boolean::execute`].
    pub fn difference(&self, other: &Self) -> Result<Self> {
        Boolean::new(BooleanOp::Difference, self.clone(), other.clone()).execute()
    }

    /// # Errors
    ///
    /// See [`Boolean::execute`].
    pub fn xor(&self, other: &Self) -> Result<Self> {
        Boolean::new(BooleanOp::Xor, self.clone(), other.clone()).execute()
    }
}

impl Transform2 for PolygonSet {
    fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(Point) -> Point,
    {
        Self::new(self.polygons.iter().map(|poly| poly.map_points(&f)).collect())
    }
}

impl From<Polygon> for PolygonSet {
    fn from(polygon: Polygon) -> Self {
        Self::new(vec![polygon])
    }
}

impl FromIterator<Polygon> for PolygonSet {
    fn from_iter<I: IntoIterator<Item = Polygon>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Polygon> for PolygonSet {
    fn extend<I: IntoIterator<Item = Polygon>>(&mut self, iter: I) {
        self.polygons.extend(iter);
    }
}

impl IntoIterator for PolygonSet {
    type Item = Polygon;
    type IntoIter = std::vec::IntoIter<Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.into_iter()
    }
}

impl<'a> IntoIterator for &'a PolygonSet {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn hole_subtracts_from_area() {
        let outer = Polygon::rectangle(p(0.0, 0.0), p(10.0, 10.0));
        let hole = Polygon::rectangle(p(2.0, 2.0), p(4.0, 4.0)).reversed();
        let set: PolygonSet = [outer, hole].into_iter().collect();
        assert!((set.area() - 96.0).abs() < 1e-12);
        assert!(set.contains_point(p(1.0, 1.0)));
        assert!(!set.contains_point(p(3.0, 3.0)));
        assert!(!set.contains_point(p(11.0, 3.0)));
    }

    #[test]
    fn canonical_sorts_members() {
        let a = Polygon::rectangle(p(5.0, 0.0), p(6.0, 1.0));
        let b = Polygon::rectangle(p(0.0, 0.0), p(1.0, 1.0)).reversed();
        let canon = PolygonSet::new(vec![a.clone(), b]).canonical();
        assert_eq!(canon.polygons()[0].points()[0], p(0.0, 0.0));
        assert!(canon.polygons()[0].is_ccw());
        assert_eq!(canon.polygons()[1], a);
    }

    #[test]
    fn bounds_span_members() {
        let set = PolygonSet::new(vec![
            Polygon::rectangle(p(0.0, 0.0), p(1.0, 1.0)),
            Polygon::rectangle(p(-3.0, 2.0), p(-2.0, 5.0)),
        ]);
        let b = set.bounds().unwrap();
        assert_eq!((b.xmin, b.xmax, b.ymin, b.ymax), (-3.0, 1.0, 0.0, 5.0));
        assert!(PolygonSet::default().bounds().is_none());
    }

    #[test]
    fn translate_moves_every_member() {
        let set = PolygonSet::from(Polygon::rectangle(p(0.0, 0.0), p(1.0, 1.0)));
        let moved = set.translate(p(0.0, 3.0));
        assert_eq!(moved.polygons()[0].points()[0], p(0.0, 3.0));
    }
}
