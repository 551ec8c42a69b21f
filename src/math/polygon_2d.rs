use super::intersect_2d::{orientation, within_box, Orientation};
use super::Point;

/// Location of a point relative to a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    Outside,
    Inside,
    Boundary,
}

impl Containment {
    /// Tri-valued code: `+1` inside, `0` outside, `-1` on the boundary.
    #[must_use]
    pub fn code(self) -> i8 {
        match self {
            Self::Inside => 1,
            Self::Outside => 0,
            Self::Boundary => -1,
        }
    }

    /// True for interior or boundary points.
    #[must_use]
    pub fn is_covered(self) -> bool {
        !matches!(self, Self::Outside)
    }
}

/// Shoelace area of the closed vertex list; positive when counter-clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let next = points.iter().skip(1).chain(points.first());
    0.5 * points
        .iter()
        .zip(next)
        .map(|(&a, &b)| a.cross(b))
        .sum::<f64>()
}

/// Classifies `query` against the closed polygon `points` by crossing number.
///
/// Points lying exactly on an edge (including the implicit closing edge) are
/// reported as [`Containment::Boundary`]. Vertices touched by the horizontal
/// ray are counted with the half-open rule so they contribute one crossing.
/// Polygons with fewer than three vertices contain nothing.
#[must_use]
pub fn classify_point(points: &[Point], query: Point) -> Containment {
    let n = points.len();
    if n < 3 {
        return Containment::Outside;
    }
    let mut inside = false;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if orientation(a, b, query) == Orientation::Colinear && within_box(a, query, b) {
            return Containment::Boundary;
        }
        if (a.y > query.y) != (b.y > query.y) {
            let x_cross = a.x + (query.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if query.x < x_cross {
                inside = !inside;
            }
        }
    }
    if inside {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

/// Winding number of the closed polygon around `query`.
///
/// Non-zero means inside under the non-zero fill rule.
#[must_use]
pub fn winding_number(points: &[Point], query: Point) -> i32 {
    let n = points.len();
    if n < 3 {
        return 0;
    }
    let mut winding = 0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let side = (b - a).cross(query - a);
        if a.y <= query.y {
            if b.y > query.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= query.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// Cyclic shift of a closed vertex list that starts at its lowest-x vertex,
/// lowest y among ties. The first such vertex wins.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point]) -> Vec<Point> {
    let start = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)))
        .map_or(0, |(i, _)| i);
    let mut out = points.to_vec();
    out.rotate_left(start);
    out
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_orientation() {
        let mut pts = unit_square();
        assert_abs_diff_eq!(signed_area_2d(&pts), 1.0);
        pts.reverse();
        assert_abs_diff_eq!(signed_area_2d(&pts), -1.0);
        assert_abs_diff_eq!(signed_area_2d(&pts[..2]), 0.0);
    }

    #[test]
    fn classify_unit_square() {
        let sq = unit_square();
        assert_eq!(classify_point(&sq, Point::new(0.5, 0.5)).code(), 1);
        assert_eq!(classify_point(&sq, Point::new(1.5, 0.5)).code(), 0);
        assert_eq!(classify_point(&sq, Point::new(0.0, 0.5)).code(), -1);
        assert_eq!(classify_point(&sq, Point::new(1.0, 1.0)), Containment::Boundary);
    }

    #[test]
    fn classify_ray_through_vertex() {
        // Diamond whose left and right vertices sit on the query's horizontal ray.
        let diamond = vec![
            Point::new(0.0, -1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-1.0, 0.0),
        ];
        assert_eq!(classify_point(&diamond, Point::new(0.0, 0.0)), Containment::Inside);
        assert_eq!(classify_point(&diamond, Point::new(-2.0, 0.0)), Containment::Outside);
    }

    #[test]
    fn classify_degenerate() {
        let seg = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        assert_eq!(classify_point(&seg, Point::new(0.5, 0.0)), Containment::Outside);
    }

    #[test]
    fn winding_follows_orientation() {
        let mut sq = unit_square();
        assert_eq!(winding_number(&sq, Point::new(0.5, 0.5)), 1);
        sq.reverse();
        assert_eq!(winding_number(&sq, Point::new(0.5, 0.5)), -1);
        assert_eq!(winding_number(&sq, Point::new(2.0, 0.5)), 0);
    }

    #[test]
    fn canonical_start_rotation() {
        let pts = vec![
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.0),
        ];
        let rotated = rotate_to_canonical_start(&pts);
        assert_eq!(rotated[0], Point::new(0.0, 0.0));
        assert_eq!(rotated[1], Point::new(1.0, 0.0));
    }
}
