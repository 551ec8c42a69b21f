//! Circular arc sampling for piecewise-linear approximations.
use std::f64::consts::{PI, TAU};

use super::Point;

/// Angle of `v` in radians, in `(-π, π]`.
#[must_use]
pub fn angle_of(v: Point) -> f64 {
    v.y.atan2(v.x)
}

/// Signed sweep from `start` to `end` taking the shorter way round, in `(-π, π]`.
#[must_use]
pub fn shortest_sweep(start: f64, end: f64) -> f64 {
    let mut sweep = (end - start).rem_euclid(TAU);
    if sweep > PI {
        sweep -= TAU;
    }
    sweep
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: Point, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point {
    let angle = start_angle + sweep * t;
    let (s, c) = angle.sin_cos();
    Point::new(center.x + radius * c, center.y + radius * s)
}

/// Samples `samples` equally spaced points along an arc, both ends included.
///
/// A single sample returns the arc midpoint; zero samples return nothing.
#[must_use]
pub fn sample_arc(center: Point, radius: f64, start_angle: f64, sweep: f64, samples: usize) -> Vec<Point> {
    match samples {
        0 => Vec::new(),
        1 => vec![arc_point_at(center, radius, start_angle, sweep, 0.5)],
        n => {
            #[allow(clippy::cast_precision_loss)]
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let t = i as f64 / last;
                    arc_point_at(center, radius, start_angle, sweep, t)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn sweep_takes_short_way() {
        assert_abs_diff_eq!(shortest_sweep(0.0, PI / 2.0), PI / 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(shortest_sweep(PI / 2.0, 0.0), -PI / 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(shortest_sweep(3.0, -3.0), TAU - 6.0, epsilon = 1e-12);
    }

    #[test]
    fn samples_include_endpoints() {
        let pts = sample_arc(Point::origin(), 2.0, 0.0, PI / 2.0, 5);
        assert_eq!(pts.len(), 5);
        assert_abs_diff_eq!(pts[0].x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[4].y, 2.0, epsilon = 1e-12);
        for q in &pts {
            assert_abs_diff_eq!(q.norm(), 2.0, epsilon = 1e-12);
        }
    }
}
