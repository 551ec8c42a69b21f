use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{rotate_to_canonical_start, signed_area_2d, Containment};
use crate::math::Point;
use crate::operations::boolean::{Boolean, BooleanOp};
use crate::operations::query::{PointInPolygon, PolygonInPolygon};

use super::path::{cluster_consecutive, mean};
use super::{Bounds, PolygonSet, Segment, Transform2};

/// Closed polygon with an implicit closing edge `n-1 → 0`.
///
/// Winding is free; the non-zero fill rule normalises it. Polygons handed
/// to the Boolean engine are expected to be simple.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Wraps an ordered vertex list. The closing vertex is not repeated.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle with opposite corners `a` and `b`, counter-clockwise.
    #[must_use]
    pub fn rectangle(a: Point, b: Point) -> Self {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        Self::new(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
    }

    /// Counter-clockwise regular polygon inscribed in a circle.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidArgument`] for a non-positive radius or
    /// fewer than three segments.
    pub fn circle(center: Point, radius: f64, segments: usize) -> Result<Self> {
        if radius <= 0.0 || !radius.is_finite() {
            return Err(
                GeometryError::InvalidArgument(format!("circle radius {radius} must be positive"))
                    .into(),
            );
        }
        if segments < 3 {
            return Err(GeometryError::InvalidArgument(format!(
                "a circle needs at least 3 segments, got {segments}"
            ))
            .into());
        }
        #[allow(clippy::cast_precision_loss)]
        let step = TAU / segments as f64;
        let points = (0..segments)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let (s, c) = (step * i as f64).sin_cos();
                Point::new(center.x + radius * c, center.y + radius * s)
            })
            .collect();
        Ok(Self::new(points))
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertex at `index` taken modulo the vertex count; negative indices
    /// count from the end. `None` only for an empty polygon.
    #[must_use]
    pub fn vertex(&self, index: isize) -> Option<Point> {
        let n = isize::try_from(self.points.len()).ok()?;
        if n == 0 {
            return None;
        }
        let i = usize::try_from(index.rem_euclid(n)).ok()?;
        Some(self.points[i])
    }

    /// Edges including the closing edge.
    #[must_use]
    pub fn edges(&self) -> Vec<Segment> {
        let n = self.points.len();
        if n < 2 {
            return Vec::new();
        }
        (0..n)
            .map(|i| Segment::edge(self.points[i], self.points[(i + 1) % n]))
            .collect()
    }

    /// Bounding box, or `None` for an empty polygon.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.points.iter().copied())
    }

    #[must_use]
    pub fn xmin(&self) -> Option<f64> {
        self.bounds().map(|b| b.xmin)
    }

    #[must_use]
    pub fn xmax(&self) -> Option<f64> {
        self.bounds().map(|b| b.xmax)
    }

    #[must_use]
    pub fn ymin(&self) -> Option<f64> {
        self.bounds().map(|b| b.ymin)
    }

    #[must_use]
    pub fn ymax(&self) -> Option<f64> {
        self.bounds().map(|b| b.ymax)
    }

    /// Shoelace area, positive for counter-clockwise winding.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.points.iter().rev().copied().collect())
    }

    /// Same polygon wound counter-clockwise.
    #[must_use]
    pub fn to_ccw(&self) -> Self {
        if self.signed_area() < 0.0 {
            self.reversed()
        } else {
            self.clone()
        }
    }

    /// Counter-clockwise, starting at the lowest-x (then lowest-y) vertex.
    #[must_use]
    pub fn canonical(&self) -> Self {
        Self::new(rotate_to_canonical_start(self.to_ccw().points()))
    }

    /// Scales about the bounding-box centre.
    #[must_use]
    pub fn scale_about_center(&self, factors: Point) -> Self {
        match self.bounds() {
            Some(bounds) => self.scale(bounds.center(), factors),
            None => self.clone(),
        }
    }

    /// Crossing-number classification of `point`.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> Containment {
        PointInPolygon::new(self, point).execute()
    }

    /// True if every vertex of `other` lies inside or on the boundary of `self`.
    ///
    /// Necessary but not sufficient for full containment.
    #[must_use]
    pub fn contains_polygon(&self, other: &Self) -> bool {
        PolygonInPolygon::new(self, other).execute()
    }

    /// Collapses runs of consecutive vertices at most `radius` apart into
    /// their arithmetic mean, including a run that wraps over the closing edge.
    #[must_use]
    pub fn simplify(&self, radius: f64) -> Self {
        let mut clusters = cluster_consecutive(&self.points, radius);
        if clusters.len() > 1 {
            let wraps = match (clusters.first(), clusters.last()) {
                (Some(first), Some(last)) => match (first.first(), last.last()) {
                    (Some(&a), Some(&b)) => a.distance(b) <= radius,
                    _ => false,
                },
                _ => false,
            };
            if wraps {
                if let Some(mut tail) = clusters.pop() {
                    tail.append(&mut clusters[0]);
                    clusters[0] = tail;
                }
            }
        }
        Self::new(clusters.iter().map(|c| mean(c)).collect())
    }

    /// Wraps the polygon in a one-element set.
    #[must_use]
    pub fn to_set(&self) -> PolygonSet {
        PolygonSet::from(self.clone())
    }

    /// Union under the non-zero rule.
    ///
    /// # Errors
    ///
    /// See [`Boolean::execute`].
    pub fn union(&self, other: &Self) -> Result<PolygonSet> {
        Boolean::new(BooleanOp::Union, self.to_set(), other.to_set()).execute()
    }

    /// Intersection under the non-zero rule.
    ///
    /// # Errors
    ///
    /// See [`Boolean::execute`].
    pub fn intersection(&self, other: &Self) -> Result<PolygonSet> {
        Boolean::new(BooleanOp::Intersection, self.to_set(), other.to_set()).execute()
    }

    /// Difference `self \ other` under the non-zero rule.
    ///
    /// # Errors
    ///
    /// See [`Boolean::execute`].
    pub fn difference(&self, other: &Self) -> Result<PolygonSet> {
        Boolean::new(BooleanOp::Difference, self.to_set(), other.to_set()).execute()
    }

    /// Symmetric difference under the non-zero rule.
    ///
    /// # Errors
    ///
    /// See [`Boolean::execute`].
    pub fn xor(&self, other: &Self) -> Result<PolygonSet> {
        Boolean::new(BooleanOp::Xor, self.to_set(), other.to_set()).execute()
    }
}

impl Transform2 for Polygon {
    fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(Point) -> Point,
    {
        Self::new(self.points.iter().map(|&p| f(p)).collect())
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// Mutable accumulator used while a recipe assembles a polygon.
#[derive(Debug, Clone, Default)]
pub struct PolygonBuilder {
    points: Vec<Point>,
}

impl PolygonBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex.
    pub fn push(&mut self, point: Point) -> &mut Self {
        self.points.push(point);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Freezes the accumulated vertices. A repeated closing vertex is dropped.
    #[must_use]
    pub fn build(mut self) -> Polygon {
        if self.points.len() > 1 && self.points.first() == self.points.last() {
            self.points.pop();
        }
        Polygon::new(self.points)
    }
}

impl Extend<Point> for PolygonBuilder {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}
