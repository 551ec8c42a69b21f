use tracing::debug;

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{Line, Path};
use crate::math::arc_2d::{angle_of, sample_arc, shortest_sweep};
use crate::math::{Point, RootFinder, Vector, TOLERANCE};

/// Tangent arc found by [`Fillet::solve`], in the x-ordered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilletArc {
    pub center: Point,
    /// Distance from the corner to either tangent point.
    pub tangent_distance: f64,
    /// Tangent point on the first edge.
    pub start: Point,
    /// Tangent point on the second edge.
    pub end: Point,
}

/// Replaces the middle vertex of a three-point polyline with a tangent arc.
///
/// The tangent distance `x` is found by the injected root-finder: the normals
/// raised at `p2 + x·û1` and `p2 + x·û2` meet at the centre candidate, and
/// its distance to the tangent point must equal the radius.
#[derive(Debug, Clone)]
pub struct Fillet {
    points: [Point; 3],
    radius: f64,
    samples: usize,
}

impl Fillet {
    /// Creates a new `Fillet` operation sampling the arc with `samples` points.
    #[must_use]
    pub fn new(points: [Point; 3], radius: f64, samples: usize) -> Self {
        Self {
            points,
            radius,
            samples,
        }
    }

    /// Input points ordered by x, and whether they had to be swapped.
    fn ordered(&self) -> ([Point; 3], bool) {
        let [p1, p2, p3] = self.points;
        if p1.x > p3.x {
            ([p3, p2, p1], true)
        } else {
            (self.points, false)
        }
    }

    /// Locates the tangent arc.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a bad radius or an arc
    /// that does not fit on the incident edges, [`GeometryError::Colinear`]
    /// for a straight corner and [`GeometryError::ZeroLengthEdge`] for a
    /// repeated point. Solver errors are propagated.
    pub fn solve<R: RootFinder>(&self, solver: &R) -> Result<FilletArc> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "fillet radius must be positive, got {}",
                self.radius
            ))
            .into());
        }
        let ([p1, p2, p3], _) = self.ordered();
        let u1 = (p1 - p2).normalized().ok_or(GeometryError::ZeroLengthEdge(0))?;
        let u2 = (p3 - p2).normalized().ok_or(GeometryError::ZeroLengthEdge(1))?;
        if u1.cross(u2).abs() < TOLERANCE {
            return Err(GeometryError::Colinear.into());
        }

        let r2 = self.radius * self.radius;
        let x = solver.solve(|x| Ok(centre(p2, u1, u2, x)?.1 - r2), self.radius)?;

        let reach = p1.distance(p2).min(p3.distance(p2));
        if !(x > 0.0 && x <= reach) {
            return Err(OperationError::InvalidInput(format!(
                "radius {} needs tangent distance {x}, edges allow {reach}",
                self.radius
            ))
            .into());
        }
        let (center, _) = centre(p2, u1, u2, x)?;
        debug!(x, %center, "fillet solved");
        Ok(FilletArc {
            center,
            tangent_distance: x,
            start: p2 + u1 * x,
            end: p2 + u2 * x,
        })
    }

    /// Executes the blend, returning `[p1, arc…, p3]` in input order.
    ///
    /// # Errors
    ///
    /// See [`Fillet::solve`]; zero samples is also rejected.
    pub fn execute<R: RootFinder>(&self, solver: &R) -> Result<Path> {
        if self.samples == 0 {
            return Err(OperationError::InvalidInput("fillet needs at least one sample".into()).into());
        }
        let ([p1, _, p3], reversed) = self.ordered();
        let arc = self.solve(solver)?;
        let start = angle_of(arc.start - arc.center);
        let sweep = shortest_sweep(start, angle_of(arc.end - arc.center));

        let mut points = Vec::with_capacity(self.samples + 2);
        points.push(p1);
        points.extend(sample_arc(arc.center, self.radius, start, sweep, self.samples));
        points.push(p3);
        if reversed {
            points.reverse();
        }
        Path::new(points)
    }
}

/// Centre candidate for tangent distance `x` and its squared distance to
/// the tangent point on the first edge.
fn centre(corner: Point, u1: Vector, u2: Vector, x: f64) -> Result<(Point, f64)> {
    let p4 = corner + u1 * x;
    let p5 = corner + u2 * x;
    let n1 = Line::from_direction(p4, u1.orthogonal())?;
    let n2 = Line::from_direction(p5, u2.orthogonal())?;
    let c = n1.try_intersect(&n2)?;
    let d = c - p4;
    Ok((c, d.dot(d)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::{Newton, Secant};

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn right_angle() {
        let fillet = Fillet::new([p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)], 1.0, 9);
        let arc = fillet.solve(&Secant::default()).unwrap();
        assert_abs_diff_eq!(arc.center.x, 9.0, epsilon = 1e-9);
        assert_abs_diff_eq!(arc.center.y, 1.0, epsilon = 1e-9);

        let path = fillet.execute(&Secant::default()).unwrap();
        assert_eq!(path.len(), 11);
        assert_eq!(path.first(), p(0.0, 0.0));
        assert_eq!(path.last(), p(10.0, 10.0));
        for &q in &path.points()[1..10] {
            assert_abs_diff_eq!(q.distance(arc.center), 1.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(path.points()[1].x, 9.0, epsilon = 1e-9);
        assert_abs_diff_eq!(path.points()[9].y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn reversed_input_keeps_order() {
        let fillet = Fillet::new([p(10.0, 10.0), p(10.0, 0.0), p(0.0, 0.0)], 1.0, 5);
        let path = fillet.execute(&Secant::default()).unwrap();
        assert_eq!(path.first(), p(10.0, 10.0));
        assert_eq!(path.last(), p(0.0, 0.0));
        assert_abs_diff_eq!(path.points()[1].y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn obtuse_corner_with_newton() {
        let corner = [p(-10.0, 0.0), p(0.0, 0.0), p(10.0, 5.0)];
        let fillet = Fillet::new(corner, 2.0, 7);
        let arc = fillet.solve(&Newton::default()).unwrap();
        let path = fillet.execute(&Newton::default()).unwrap();
        assert_eq!(path.first(), corner[0]);
        assert_eq!(path.last(), corner[2]);
        for &q in &path.points()[1..8] {
            assert_abs_diff_eq!(q.distance(arc.center), 2.0, epsilon = 1e-9);
        }
        // tangent to both edges
        assert_abs_diff_eq!(arc.center.y, 2.0, epsilon = 1e-9);
        let edge = Line::new(corner[1], corner[2]).unwrap();
        assert_abs_diff_eq!(edge.signed_distance(arc.center).abs(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn radius_too_large() {
        let fillet = Fillet::new([p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)], 5.0, 5);
        assert!(fillet.execute(&Secant::default()).is_err());
    }

    #[test]
    fn straight_corner_is_colinear() {
        let fillet = Fillet::new([p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)], 0.5, 5);
        let err = fillet.solve(&Secant::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::LayoutError::Geometry(GeometryError::Colinear)
        ));
    }

    #[test]
    fn path_fillet_splices_arc() {
        let path = Path::new(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(20.0, 10.0)]).unwrap();
        let blended = path.fillet(1, 1.0, 9, &Secant::default()).unwrap();
        assert_eq!(blended.len(), 12);
        assert_eq!(blended.last(), p(20.0, 10.0));
        assert!(path.fillet(0, 1.0, 9, &Secant::default()).is_err());
    }
}
