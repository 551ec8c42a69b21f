use super::{Point, INTERSECTION_CROSS_CHECK};

/// Turn direction of the triple `(p, q, r)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Colinear,
    Clockwise,
    CounterClockwise,
}

/// Sign of `(q - p) × (r - q)`.
#[must_use]
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let cross = (q - p).cross(r - q);
    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Colinear
    }
}

/// Axis-aligned box test: true if `q` lies within the bounding box of `p`–`r`.
///
/// Only meaningful when the three points are already known to be colinear.
#[must_use]
pub fn within_box(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Parametric solution of two infinite lines `p + k1 (q - p)` and `r + k2 (s - r)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSolution {
    pub k1: f64,
    pub k2: f64,
    /// Intersection derived from the first line.
    pub point: Point,
    /// Squared disagreement with the point derived from the second line.
    pub disagreement: f64,
}

impl LineSolution {
    /// Returns true if both derivations agree within the cross-check threshold.
    #[must_use]
    pub fn is_accurate(&self) -> bool {
        self.disagreement <= INTERSECTION_CROSS_CHECK
    }
}

/// Solves the 2×2 system for the intersection of the lines `(p, q)` and `(r, s)`.
///
/// Returns `None` when the determinant is exactly zero (parallel or colinear lines).
#[must_use]
pub fn solve_lines(p: Point, q: Point, r: Point, s: Point) -> Option<LineSolution> {
    let d1 = q - p;
    let d2 = s - r;
    let det = d2.x * d1.y - d1.x * d2.y;
    if det == 0.0 {
        return None;
    }
    let w = r - p;
    let k1 = (d2.x * w.y - w.x * d2.y) / det;
    let k2 = (d1.x * w.y - d1.y * w.x) / det;
    let i1 = p + d1 * k1;
    let i2 = r + d2 * k2;
    let gap = i1 - i2;
    Some(LineSolution {
        k1,
        k2,
        point: i1,
        disagreement: gap.dot(gap),
    })
}
