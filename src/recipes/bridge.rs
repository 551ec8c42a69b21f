use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Line, MirrorPlane, Path, PolygonSet, Segment};
use crate::math::{Point, RootFinder};

/// Crossover of three horizontal runners where the middle and lower runner
/// jog down along parallel 45° diagonals.
///
/// The lower diagonal lies on `x + y = 0`; the middle one on `x + y = dx`.
/// [`BridgeClosure::solve`] finds the `dx` at which the facing edges of the
/// two diagonal bands are `spacing` apart.
///
/// The target applies only to the diagonal stretch. With the default
/// heights and widths the horizontal stretches of the middle and lower
/// bands share an edge (`8 - 6 == -4 + 6`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BridgeClosure {
    /// Centre-line heights of the top, middle and lower runner.
    pub heights: [f64; 3],
    /// Band widths of the top, middle and lower runner.
    pub widths: [f64; 3],
    /// Depth of the diagonal jog.
    pub drop: f64,
    /// Horizontal extent of the runners either side of the origin.
    pub reach: f64,
    /// Target edge-to-edge spacing between the diagonal bands.
    pub spacing: f64,
}

impl Default for BridgeClosure {
    fn default() -> Self {
        Self {
            heights: [18.0, 8.0, -4.0],
            widths: [10.0, 12.0, 12.0],
            drop: 24.0,
            reach: 100.0,
            spacing: 3.0,
        }
    }
}

/// Solved crossover.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeRunners {
    pub dx: f64,
    pub paths: [Path; 3],
    /// Thickened runners in top, middle, lower order.
    pub polygons: PolygonSet,
}

impl BridgeClosure {
    /// Centre lines of the three runners for diagonal offset `dx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the jog collapses into a repeated vertex.
    pub fn paths(&self, dx: f64) -> Result<[Path; 3]> {
        let [top, mid, low] = self.heights;
        let r = self.reach;
        Ok([
            Path::new(vec![Point::new(-r, top), Point::new(r, top)])?,
            jogged(r, mid, dx, self.drop)?,
            jogged(r, low, 0.0, self.drop)?,
        ])
    }

    /// Signed distance from the lower band's upper diagonal edge to the
    /// middle band's lower diagonal edge, measured along `(1, 1)/√2`.
    ///
    /// # Errors
    ///
    /// Returns an error if a diagonal degenerates.
    pub fn spacing_at(&self, dx: f64) -> Result<f64> {
        let [_, mid, low] = self.paths(dx)?;
        let [_, w_mid, w_low] = self.widths;
        let mid_edge = diagonal(&mid)?.offset(-0.5 * w_mid)?;
        let low_edge = diagonal(&low)?.offset(0.5 * w_low)?;
        Ok(low_edge.signed_distance(mid_edge.points().0))
    }

    /// Finds `dx` with the root-finder, starting from `x0`.
    ///
    /// # Errors
    ///
    /// Propagates solver errors.
    pub fn solve<R: RootFinder>(&self, solver: &R, x0: f64) -> Result<f64> {
        let dx = solver.solve(|dx| Ok(self.spacing_at(dx)? - self.spacing), x0)?;
        debug!(dx, spacing = self.spacing, "bridge closure solved");
        Ok(dx)
    }

    /// Solves the closure and thickens the runners.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a non-positive spacing and
    /// propagates solver and thickening errors.
    pub fn execute<R: RootFinder>(&self, solver: &R, x0: f64) -> Result<BridgeRunners> {
        if self.spacing <= 0.0 || self.spacing.is_nan() {
            return Err(OperationError::InvalidInput(format!(
                "bridge spacing must be positive, got {}",
                self.spacing
            ))
            .into());
        }
        let dx = self.solve(solver, x0)?;
        let paths = self.paths(dx)?;
        let polygons = paths
            .iter()
            .zip(self.widths)
            .map(|(path, width)| path.thicken(width))
            .collect::<Result<PolygonSet>>()?;
        Ok(BridgeRunners {
            dx,
            paths,
            polygons,
        })
    }
}

/// Runner at height `y` that drops by `drop` along `x + y = shift`.
fn jogged(reach: f64, y: f64, shift: f64, drop: f64) -> Result<Path> {
    let start = Point::new(shift - y, y);
    Path::new(vec![
        Point::new(-reach, y),
        start,
        start + Point::new(drop, -drop),
        Point::new(reach, y - drop),
    ])
}

fn diagonal(path: &Path) -> Result<Segment> {
    let p = path.points();
    Segment::new(p[1], p[2])
}

/// Z-shaped path crossing between two runners of `width` whose facing
/// edges are `spacing` apart.
///
/// The inner vertices are where the centre lines `y = ±(spacing + width)/2`
/// meet the diagonal `y = x`; the ends sit at `x = ∓reach`.
///
/// # Errors
///
/// Returns [`OperationError::InvalidInput`] for non-positive parameters.
pub fn two_point_bridge(width: f64, spacing: f64, reach: f64) -> Result<Path> {
    if !(width > 0.0 && spacing > 0.0 && reach > 0.0) {
        return Err(OperationError::InvalidInput(format!(
            "bridge needs positive width, spacing and reach, got {width}, {spacing}, {reach}"
        ))
        .into());
    }
    let y0 = 0.5 * (spacing + width);
    let upper = Line::new(Point::new(0.0, y0), Point::new(1.0, y0))?;
    let lower = upper.mirror(Point::origin(), MirrorPlane::Y)?;
    let diagonal = Line::new(Point::origin(), Point::new(1.0, 1.0))?;
    let a = upper.try_intersect(&diagonal)?;
    let b = lower.try_intersect(&diagonal)?;
    Path::new(vec![Point::new(-reach, a.y), a, b, Point::new(reach, b.y)])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::SQRT_2;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::{Newton, Secant};

    #[test]
    fn spacing_is_linear_in_dx() {
        let bridge = BridgeClosure::default();
        assert_abs_diff_eq!(bridge.spacing_at(0.0).unwrap(), -12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            bridge.spacing_at(10.0).unwrap(),
            10.0 / SQRT_2 - 12.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn closure_with_secant() {
        let bridge = BridgeClosure::default();
        let runners = bridge.execute(&Secant::default(), 3.0).unwrap();
        assert_abs_diff_eq!(runners.dx, 15.0 * SQRT_2, epsilon = 1e-6);
        assert_abs_diff_eq!(bridge.spacing_at(runners.dx).unwrap(), 3.0, epsilon = 1e-6);
        assert_eq!(runners.polygons.len(), 3);
        assert_eq!(runners.polygons.polygons()[1].len(), 8);
    }

    #[test]
    fn closure_is_solver_independent() {
        let bridge = BridgeClosure::default();
        let a = bridge.solve(&Secant::default(), 3.0).unwrap();
        let b = bridge.solve(&Newton::default(), 3.0).unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }

    #[test]
    fn diagonal_bands_do_not_overlap() {
        let runners = BridgeClosure::default()
            .execute(&Secant::default(), 3.0)
            .unwrap();
        let polys = runners.polygons.polygons();
        let overlap = polys[1].intersection(&polys[2]).unwrap();
        assert!(overlap.area().abs() < 1e-9);
    }

    #[test]
    fn horizontal_bands_share_an_edge() {
        let bridge = BridgeClosure::default();
        let [_, middle, lower] = bridge.heights;
        assert_abs_diff_eq!(
            middle - bridge.widths[1] / 2.0,
            lower + bridge.widths[2] / 2.0
        );
        let runners = bridge.execute(&Secant::default(), 3.0).unwrap();
        let polys = runners.polygons.polygons();
        assert_eq!(polys[1].union(&polys[2]).unwrap().len(), 1);
    }

    #[test]
    fn two_point_bridge_vertices() {
        let path = two_point_bridge(12.0, 3.0, 20.0).unwrap();
        assert_eq!(path.points()[1], Point::new(7.5, 7.5));
        assert_eq!(path.points()[2], Point::new(-7.5, -7.5));
        assert_eq!(path.first(), Point::new(-20.0, 7.5));
        assert_eq!(path.last(), Point::new(20.0, -7.5));
        assert!(two_point_bridge(-1.0, 3.0, 20.0).is_err());
    }
}
