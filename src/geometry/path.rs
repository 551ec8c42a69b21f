use crate::error::{GeometryError, Result};
use crate::math::{Point, RootFinder, Vector};
use crate::operations::blend::Fillet;
use crate::operations::offset::ThickenPath;

use super::{Bounds, Polygon, Segment, Transform2};

/// Open polyline of at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Freezes `points` into a path.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidArgument`] for fewer than two points
    /// or non-finite coordinates.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::InvalidArgument(format!(
                "a path needs at least 2 points, got {}",
                points.len()
            ))
            .into());
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(
                GeometryError::InvalidArgument(format!("non-finite path point {bad}")).into(),
            );
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a path holds at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn first(&self) -> Point {
        self.points[0]
    }

    #[must_use]
    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Edges `i → i+1`.
    #[must_use]
    pub fn edges(&self) -> Vec<Segment> {
        self.points
            .windows(2)
            .map(|w| Segment::edge(w[0], w[1]))
            .collect()
    }

    /// Edge vectors `p[i+1] - p[i]`.
    #[must_use]
    pub fn vectors(&self) -> Vec<Vector> {
        self.points.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Sum of the edge lengths.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vectors().iter().map(|v| v.norm()).sum()
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            xmin: self.points[0].x,
            xmax: self.points[0].x,
            ymin: self.points[0].y,
            ymax: self.points[0].y,
        };
        for &p in &self.points[1..] {
            bounds.include(p);
        }
        bounds
    }

    /// Same points in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Collapses runs of consecutive points closer than or equal to `radius`.
    ///
    /// Interior runs become their arithmetic mean; a run containing an end
    /// of the path collapses onto that end, so both endpoints survive.
    #[must_use]
    pub fn simplify(&self, radius: f64) -> Self {
        let clusters = cluster_consecutive(&self.points, radius);
        let last_cluster = clusters.len() - 1;
        let mut points: Vec<Point> = clusters
            .iter()
            .enumerate()
            .map(|(i, cluster)| {
                if i == 0 {
                    self.first()
                } else if i == last_cluster {
                    self.last()
                } else {
                    mean(cluster)
                }
            })
            .collect();
        if points.len() < 2 {
            points = vec![self.first(), self.last()];
        }
        Self { points }
    }

    /// Sweeps the path with a band of `width` (square caps, mitre joins).
    ///
    /// # Errors
    ///
    /// See [`ThickenPath::execute`].
    pub fn thicken(&self, width: f64) -> Result<Polygon> {
        ThickenPath::new(self.clone(), width).execute()
    }

    /// Replaces internal vertex `index` with a tangent arc of `radius`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidArgument`] when `index` is not an
    /// internal vertex, and propagates errors from [`Fillet::execute`].
    pub fn fillet<R: RootFinder>(
        &self,
        index: usize,
        radius: f64,
        samples: usize,
        solver: &R,
    ) -> Result<Self> {
        if index == 0 || index + 1 >= self.points.len() {
            return Err(GeometryError::InvalidArgument(format!(
                "vertex {index} is not an internal vertex of a {}-point path",
                self.points.len()
            ))
            .into());
        }
        let corner = Fillet::new(
            [
                self.points[index - 1],
                self.points[index],
                self.points[index + 1],
            ],
            radius,
            samples,
        )
        .execute(solver)?;
        let mut points = Vec::with_capacity(self.points.len() + samples);
        points.extend_from_slice(&self.points[..index - 1]);
        points.extend_from_slice(corner.points());
        points.extend_from_slice(&self.points[index + 2..]);
        Ok(Self { points })
    }
}

impl Transform2 for Path {
    fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(Point) -> Point,
    {
        Self {
            points: self.points.iter().map(|&p| f(p)).collect(),
        }
    }
}

/// Mutable accumulator used while a recipe assembles a path.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    points: Vec<Point>,
}

impl PathBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a builder at `start`.
    #[must_use]
    pub fn start_at(start: Point) -> Self {
        Self {
            points: vec![start],
        }
    }

    /// Appends a point.
    pub fn push(&mut self, point: Point) -> &mut Self {
        self.points.push(point);
        self
    }

    /// Appends the current end point displaced by `delta`.
    pub fn push_relative(&mut self, delta: Vector) -> &mut Self {
        let base = self.points.last().copied().unwrap_or_default();
        self.points.push(base + delta);
        self
    }

    /// Current end point, if any.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Freezes the accumulated points.
    ///
    /// # Errors
    ///
    /// See [`Path::new`].
    pub fn build(self) -> Result<Path> {
        Path::new(self.points)
    }
}

impl Extend<Point> for PathBuilder {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

/// Groups consecutive points whose separation is at most `radius`.
pub(crate) fn cluster_consecutive(points: &[Point], radius: f64) -> Vec<Vec<Point>> {
    let mut clusters: Vec<Vec<Point>> = Vec::new();
    for &p in points {
        match clusters.last_mut() {
            Some(cluster) if cluster.last().is_some_and(|&q| q.distance(p) <= radius) => {
                cluster.push(p);
            }
            _ => clusters.push(vec![p]),
        }
    }
    clusters
}

/// Arithmetic mean of a non-empty point run.
pub(crate) fn mean(points: &[Point]) -> Point {
    let sum = points
        .iter()
        .fold(Point::origin(), |acc, &p| acc + p);
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    sum / n
}
