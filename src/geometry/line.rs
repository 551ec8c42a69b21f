use tracing::warn;

use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{orientation, solve_lines, within_box, Orientation};
use crate::math::{Point, Vector};

use super::MirrorPlane;

/// Outcome of intersecting two line primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The primitives meet at a single point.
    Point(Point),
    /// Infinite lines are parallel or coincident.
    Colinear,
    /// Finite segments do not meet.
    Disjoint,
}

impl Intersection {
    /// Returns the intersection point, if any.
    #[must_use]
    pub fn point(self) -> Option<Point> {
        match self {
            Self::Point(p) => Some(p),
            Self::Colinear | Self::Disjoint => None,
        }
    }
}

fn check_endpoints(p: Point, q: Point) -> Result<()> {
    if !p.is_finite() || !q.is_finite() {
        return Err(GeometryError::InvalidArgument(format!(
            "line endpoints must be finite, got {p} and {q}"
        ))
        .into());
    }
    if p == q {
        return Err(GeometryError::InvalidArgument(format!(
            "line endpoints must be distinct, got {p} twice"
        ))
        .into());
    }
    Ok(())
}

/// Infinite line through two distinct finite points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    p: Point,
    q: Point,
}

impl Line {
    /// Creates the line through `p` and `q`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidArgument`] if either point is not
    /// finite or the points coincide.
    pub fn new(p: Point, q: Point) -> Result<Self> {
        check_endpoints(p, q)?;
        Ok(Self { p, q })
    }

    /// Line through `origin` along `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidArgument`] for a zero or non-finite direction.
    pub fn from_direction(origin: Point, direction: Vector) -> Result<Self> {
        Self::new(origin, origin + direction)
    }

    /// The two defining points.
    #[must_use]
    pub fn points(&self) -> (Point, Point) {
        (self.p, self.q)
    }

    /// Direction vector `q - p`.
    #[must_use]
    pub fn direction(&self) -> Vector {
        self.q - self.p
    }

    /// `(y2 - y1) / (x2 - x1)`; `+inf` for vertical lines.
    #[must_use]
    pub fn slope(&self) -> f64 {
        let dx = self.q.x - self.p.x;
        if dx == 0.0 {
            return f64::INFINITY;
        }
        (self.q.y - self.p.y) / dx
    }

    /// `(y1 x2 - y2 x1) / (x2 - x1)`; NaN for vertical lines.
    #[must_use]
    pub fn intercept(&self) -> f64 {
        let dx = self.q.x - self.p.x;
        if dx == 0.0 {
            return f64::NAN;
        }
        (self.p.y * self.q.x - self.q.y * self.p.x) / dx
    }

    /// Evaluates `slope * x + intercept`. NaN for vertical lines.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        let slope = self.slope();
        if slope.is_infinite() {
            return f64::NAN;
        }
        slope * x + self.intercept()
    }

    /// Signed perpendicular distance of `point`; positive on the left of `p → q`.
    #[must_use]
    pub fn signed_distance(&self, point: Point) -> f64 {
        let d = self.direction();
        d.cross(point - self.p) / d.norm()
    }

    /// Parallel line shifted by `distance` along the unit left normal.
    #[must_use]
    pub fn offset(&self, distance: f64) -> Self {
        let shift = self.direction().orthogonal() * (distance / self.direction().norm());
        Self {
            p: self.p + shift,
            q: self.q + shift,
        }
    }

    /// Intersects two infinite lines.
    ///
    /// Returns [`Intersection::Colinear`] when the system determinant is
    /// exactly zero. If the point derived from the second line disagrees with
    /// the first beyond the cross-check threshold a warning is logged and the
    /// first value is returned.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Intersection {
        let Some(solution) = solve_lines(self.p, self.q, other.p, other.q) else {
            return Intersection::Colinear;
        };
        if !solution.is_accurate() {
            warn!(
                disagreement = solution.disagreement,
                point = %solution.point,
                "line intersection numerically inaccurate"
            );
        }
        Intersection::Point(solution.point)
    }

    /// Like [`Line::intersect`] but reports colinearity as an error.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Colinear`] for parallel lines.
    pub fn try_intersect(&self, other: &Self) -> Result<Point> {
        self.intersect(other)
            .point()
            .ok_or_else(|| GeometryError::Colinear.into())
    }
}

/// Transforms for two-point primitives.
///
/// Unlike [`Transform2`](super::Transform2) these re-validate the mapped
/// endpoints, which snapping or a zero scale factor can collapse.
macro_rules! checked_transforms {
    ($ty:ty, $a:ident, $b:ident) => {
        impl $ty {
            /// Applies `f` to both endpoints and validates the result.
            ///
            /// # Errors
            ///
            /// Returns [`GeometryError::InvalidArgument`] if the mapped
            /// endpoints coincide or are not finite.
            pub fn try_map_points<F>(&self, f: F) -> Result<Self>
            where
                F: Fn(Point) -> Point,
            {
                Self::new(f(self.$a), f(self.$b))
            }

            /// Rotates about `center` by `angle` degrees.
            ///
            /// # Errors
            ///
            /// See [`Self::try_map_points`].
            pub fn rotate(&self, center: Point, angle: f64) -> Result<Self> {
                self.try_map_points(|p| p.rotate(center, angle))
            }

            /// Mirrors across `plane` through `center`.
            ///
            /// # Errors
            ///
            /// See [`Self::try_map_points`].
            pub fn mirror(&self, center: Point, plane: MirrorPlane) -> Result<Self> {
                self.try_map_points(|p| p.mirror(center, plane))
            }

            /// Displaces by `vector`.
            ///
            /// # Errors
            ///
            /// See [`Self::try_map_points`].
            pub fn translate(&self, vector: Vector) -> Result<Self> {
                self.try_map_points(|p| p + vector)
            }

            /// Scales about `center` with per-axis `factors`.
            ///
            /// # Errors
            ///
            /// See [`Self::try_map_points`].
            pub fn scale(&self, center: Point, factors: Point) -> Result<Self> {
                self.try_map_points(|p| p.scale(center, factors))
            }

            /// Snaps both endpoints to `grid`.
            ///
            /// # Errors
            ///
            /// See [`Self::try_map_points`].
            pub fn ongrid(&self, grid: f64) -> Result<Self> {
                self.try_map_points(|p| p.ongrid(grid))
            }
        }
    };
}

checked_transforms!(Line, p, q);

/// Finite segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    /// Creates the segment `start → end`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidArgument`] if either point is not
    /// finite or the points coincide.
    pub fn new(start: Point, end: Point) -> Result<Self> {
        check_endpoints(start, end)?;
        Ok(Self { start, end })
    }

    /// Edge of a polyline; may be zero-length when the polyline repeats a vertex.
    pub(crate) fn edge(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Edge vector `end - start`.
    #[must_use]
    pub fn vector(&self) -> Vector {
        self.end - self.start
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        (self.start + self.end) * 0.5
    }

    /// Infinite line through the segment.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidArgument`] for a zero-length segment.
    pub fn line(&self) -> Result<Line> {
        Line::new(self.start, self.end)
    }

    /// Infinite line parallel to the segment, shifted by `distance` along
    /// the unit left normal of `start → end`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidArgument`] for a zero-length segment.
    pub fn offset(&self, distance: f64) -> Result<Line> {
        Ok(self.line()?.offset(distance))
    }

    /// True if `point` lies on the closed segment.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        orientation(self.start, self.end, point) == Orientation::Colinear
            && within_box(self.start, point, self.end)
    }

    /// Intersects two finite segments.
    ///
    /// Proper crossings are resolved through the infinite-line intersection;
    /// touching or overlapping colinear segments report the shared endpoint.
    /// Returns [`Intersection::Disjoint`] when the segments do not meet.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Intersection {
        let (p1, q1) = (self.start, self.end);
        let (p2, q2) = (other.start, other.end);
        let o1 = orientation(p1, q1, p2);
        let o2 = orientation(p1, q1, q2);
        let o3 = orientation(p2, q2, p1);
        let o4 = orientation(p2, q2, q1);

        if o1 != o2 && o3 != o4 {
            if o1 == Orientation::Colinear {
                return Intersection::Point(p2);
            }
            if o2 == Orientation::Colinear {
                return Intersection::Point(q2);
            }
            if o3 == Orientation::Colinear {
                return Intersection::Point(p1);
            }
            if o4 == Orientation::Colinear {
                return Intersection::Point(q1);
            }
            return match solve_lines(p1, q1, p2, q2) {
                Some(solution) => Intersection::Point(solution.point),
                None => Intersection::Disjoint,
            };
        }
        if o1 == Orientation::Colinear && within_box(p1, p2, q1) {
            return Intersection::Point(p2);
        }
        if o2 == Orientation::Colinear && within_box(p1, q2, q1) {
            return Intersection::Point(q2);
        }
        if o3 == Orientation::Colinear && within_box(p2, p1, q2) {
            return Intersection::Point(p1);
        }
        if o4 == Orientation::Colinear && within_box(p2, q1, q2) {
            return Intersection::Point(q1);
        }
        Intersection::Disjoint
    }
}

checked_transforms!(Segment, start, end);
