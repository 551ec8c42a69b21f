use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::geometry::{Intersection, Line, MirrorPlane};

/// Immutable 2D coordinate.
///
/// Equality is exact coordinate equality. Arithmetic is component-wise, with
/// either another point or a scalar on either side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Direction or displacement. Same representation as [`Point`].
pub type Vector = Point;

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin `(0, 0)`.
    #[must_use]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Returns true if both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// The +90° rotation `(-y, x)`.
    #[must_use]
    pub fn orthogonal(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Euclidean length.
    #[must_use]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Scalar product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Returns the vector scaled to unit length, or `None` for the zero vector.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.norm();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        Some(self / len)
    }

    /// Component-wise power with a scalar exponent.
    #[must_use]
    pub fn pow(self, exponent: f64) -> Self {
        Self::new(self.x.powf(exponent), self.y.powf(exponent))
    }

    /// Component-wise power with per-axis exponents.
    #[must_use]
    pub fn pow_point(self, exponent: Self) -> Self {
        Self::new(self.x.powf(exponent.x), self.y.powf(exponent.y))
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).norm()
    }

    /// Perpendicular distance to an infinite line.
    ///
    /// Builds the orthogonal through `self`, intersects it with `line` and
    /// measures the distance to the foot point.
    #[must_use]
    pub fn distance_to_line(self, line: &Line) -> f64 {
        let (p1, p2) = line.points();
        let normal = Vector::new(p1.y - p2.y, p2.x - p1.x);
        let foot = Line::new(self, self + normal)
            .map(|perpendicular| perpendicular.intersect(line));
        match foot {
            Ok(Intersection::Point(foot)) => self.distance(foot),
            _ => line.signed_distance(self).abs(),
        }
    }

    /// Rotates about `center` by `angle` degrees.
    ///
    /// Multiples of 90° are evaluated without trigonometry.
    #[must_use]
    pub fn rotate(self, center: Self, angle: f64) -> Self {
        let d = self - center;
        let a = angle.rem_euclid(360.0);
        if a == 0.0 {
            self
        } else if a == 90.0 {
            Self::new(center.x - d.y, center.y + d.x)
        } else if a == 180.0 {
            Self::new(center.x - d.x, center.y - d.y)
        } else if a == 270.0 {
            Self::new(center.x + d.y, center.y - d.x)
        } else {
            let (s, c) = angle.to_radians().sin_cos();
            Self::new(
                center.x + d.x * c - d.y * s,
                center.y + d.x * s + d.y * c,
            )
        }
    }

    /// Mirrors across the coordinate plane(s) through `center` selected by `plane`.
    #[must_use]
    pub fn mirror(self, center: Self, plane: MirrorPlane) -> Self {
        let (flip_x, flip_y) = plane.flips();
        let x = if flip_x { center.x - (self.x - center.x) } else { self.x };
        let y = if flip_y { center.y - (self.y - center.y) } else { self.y };
        Self::new(x, y)
    }

    /// Displaces by `vector`.
    #[must_use]
    pub fn translate(self, vector: Vector) -> Self {
        self + vector
    }

    /// Scales about `center` with per-axis factors.
    #[must_use]
    pub fn scale(self, center: Self, factors: Self) -> Self {
        center + (self - center) * factors
    }

    /// Snaps both coordinates to the nearest multiple of `grid`.
    ///
    /// When `1 / grid` is an integer the snapped value is computed by
    /// division, so decimal grids give the shortest decimal representation.
    #[must_use]
    pub fn ongrid(self, grid: f64) -> Self {
        Self::new(snap(self.x, grid), snap(self.y, grid))
    }

    /// Converts to a 3D point at height `z`.
    #[must_use]
    pub fn to_point3(self, z: f64) -> super::Point3 {
        super::Point3::new(self.x, self.y, z)
    }
}

/// Rounds `value` to the nearest multiple of `grid`; non-positive grids pass through.
pub(crate) fn snap(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 || !grid.is_finite() {
        return value;
    }
    let inverse = (1.0 / grid).round();
    if inverse >= 1.0 && (inverse * grid - 1.0).abs() < 1e-12 {
        (value * inverse).round() / inverse
    } else {
        (value / grid).round() * grid
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl From<nalgebra::Point2<f64>> for Point {
    fn from(p: nalgebra::Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point> for nalgebra::Point2<f64> {
    fn from(p: Point) -> Self {
        nalgebra::Point2::new(p.x, p.y)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

macro_rules! componentwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Point {
            type Output = Point;

            fn $method(self, rhs: Point) -> Point {
                Point::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl $trait<f64> for Point {
            type Output = Point;

            fn $method(self, rhs: f64) -> Point {
                Point::new(self.x $op rhs, self.y $op rhs)
            }
        }

        impl $trait<Point> for f64 {
            type Output = Point;

            fn $method(self, rhs: Point) -> Point {
                Point::new(self $op rhs.x, self $op rhs.y)
            }
        }
    };
}

componentwise!(Add, add, +);
componentwise!(Sub, sub, -);
componentwise!(Mul, mul, *);
componentwise!(Div, div, /);
