use tracing::debug;

use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{Intersection, Line, Path, Polygon, PolygonBuilder};
use crate::math::{Point, Vector};

/// Sweeps an open path with a band of constant width.
///
/// The band is centred on the path, has square caps orthogonal to the first
/// and last edge and unlimited mitre joins, so an acute corner yields a long
/// spike. The result has `2n` vertices for `n` path points, minus one per
/// side for every colinear join.
#[derive(Debug, Clone)]
pub struct ThickenPath {
    path: Path,
    width: f64,
}

impl ThickenPath {
    /// Creates a new `ThickenPath` operation.
    #[must_use]
    pub fn new(path: Path, width: f64) -> Self {
        Self { path, width }
    }

    /// Executes the thickening.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a width that is not
    /// strictly positive and finite, and [`GeometryError::ZeroLengthEdge`]
    /// if two consecutive path points coincide.
    pub fn execute(&self) -> Result<Polygon> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "thickening width must be positive, got {}",
                self.width
            ))
            .into());
        }
        let half = 0.5 * self.width;
        let points = self.path.points();
        let normals = edge_normals(points)?;

        let (Some(&first), Some(&last), Some(&u_first), Some(&u_last)) =
            (points.first(), points.last(), normals.first(), normals.last())
        else {
            return Err(OperationError::InvalidInput("path has no edges".into()).into());
        };

        let mut builder = PolygonBuilder::new();
        builder.push(first - u_first * half).push(first + u_first * half);
        builder.extend(mitres(points, &normals, half)?);
        builder.push(last + u_last * half).push(last - u_last * half);
        let mut right = mitres(points, &normals, -half)?;
        right.reverse();
        builder.extend(right);

        Ok(builder.build())
    }
}

/// Unit +90° normal of every edge.
fn edge_normals(points: &[Point]) -> Result<Vec<Vector>> {
    points
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            (w[1] - w[0])
                .orthogonal()
                .normalized()
                .ok_or_else(|| GeometryError::ZeroLengthEdge(i).into())
        })
        .collect()
}

/// Mitre vertices on the side offset by `distance` along the edge normals.
fn mitres(points: &[Point], normals: &[Vector], distance: f64) -> Result<Vec<Point>> {
    let lines = points
        .windows(2)
        .zip(normals)
        .map(|(w, &u)| Line::new(w[0] + u * distance, w[1] + u * distance))
        .collect::<Result<Vec<_>>>()?;

    let mut out = Vec::with_capacity(lines.len().saturating_sub(1));
    for (i, pair) in lines.windows(2).enumerate() {
        match pair[0].intersect(&pair[1]) {
            Intersection::Point(p) => out.push(p),
            Intersection::Colinear | Intersection::Disjoint => {
                debug!(vertex = i + 1, "colinear join, mitre skipped");
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn assert_points(actual: &[Point], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?}");
        for (a, &(x, y)) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(a.x, x, epsilon = 1e-12);
            assert_abs_diff_eq!(a.y, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn right_angle_mitres() {
        let path = Path::new(vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0)]).unwrap();
        let poly = ThickenPath::new(path, 2.0).execute().unwrap();
        assert_points(
            poly.points(),
            &[
                (0.0, -1.0),
                (0.0, 1.0),
                (9.0, 1.0),
                (9.0, 10.0),
                (11.0, 10.0),
                (11.0, -1.0),
            ],
        );
    }

    #[test]
    fn colinear_join_is_skipped() {
        let path = Path::new(vec![p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0)]).unwrap();
        let poly = path.thicken(2.0).unwrap();
        assert_eq!(poly.len(), 4);
        assert_abs_diff_eq!(poly.area(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn acute_corner_spikes() {
        let path = Path::new(vec![p(0.0, 0.0), p(10.0, 0.0), p(0.0, 1.0)]).unwrap();
        let poly = path.thicken(1.0).unwrap();
        let xmax = poly.xmax().unwrap();
        assert!(xmax > 15.0, "mitre length is not limited: {xmax}");
    }

    #[test]
    fn rejects_bad_width() {
        let path = Path::new(vec![p(0.0, 0.0), p(1.0, 0.0)]).unwrap();
        assert!(path.thicken(-1.0).is_err());
        assert!(path.thicken(0.0).is_err());
        assert!(path.thicken(f64::NAN).is_err());
    }

    #[test]
    fn rejects_repeated_point() {
        let path = Path::new(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0)]).unwrap();
        let err = path.thicken(1.0).unwrap_err();
        assert!(err.to_string().contains("vertex 1"));
    }

    proptest! {
        #[test]
        fn straight_band_area(
            x0 in -10.0..10.0f64,
            y0 in -10.0..10.0f64,
            angle in 0.0..std::f64::consts::TAU,
            length in 1.0..50.0f64,
            width in 1.0..20.0f64,
        ) {
            let a = p(x0, y0);
            let b = a + p(angle.cos(), angle.sin()) * length;
            let poly = Path::new(vec![a, b]).unwrap().thicken(width).unwrap();
            prop_assert_eq!(poly.len(), 4);
            let expected = a.distance(b) * width;
            assert_relative_eq!(poly.area(), expected, max_relative = 1e-10);
        }
    }

    #[test]
    fn axis_aligned_band_area_is_exact() {
        let poly = Path::new(vec![p(-3.0, 2.0), p(7.0, 2.0)]).unwrap().thicken(4.0).unwrap();
        assert_eq!(poly.len(), 4);
        assert_eq!(poly.area(), 40.0);
    }
}
