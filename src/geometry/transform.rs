use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point, Vector};

/// Coordinate plane(s) a mirror reflects across.
///
/// Named by the plane normal: `X` flips x (normal `(1, 0)`), `Y` flips y
/// (normal `(0, 1)`), `XY` flips both, a point reflection through the centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MirrorPlane {
    #[default]
    None,
    X,
    Y,
    XY,
}

impl MirrorPlane {
    /// Maps a plane normal in `{(0,0), (1,0), (0,1), (1,1)}` to a mirror plane.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidArgument`] for any other normal.
    pub fn from_normal(nx: u8, ny: u8) -> Result<Self> {
        match (nx, ny) {
            (0, 0) => Ok(Self::None),
            (1, 0) => Ok(Self::X),
            (0, 1) => Ok(Self::Y),
            (1, 1) => Ok(Self::XY),
            _ => Err(GeometryError::InvalidArgument(format!(
                "unsupported mirror plane normal ({nx}, {ny})"
            ))
            .into()),
        }
    }

    /// Which axes are flipped, as `(x, y)`.
    #[must_use]
    pub fn flips(self) -> (bool, bool) {
        match self {
            Self::None => (false, false),
            Self::X => (true, false),
            Self::Y => (false, true),
            Self::XY => (true, true),
        }
    }
}

/// Affine transforms applied point-wise. Every method returns a new value.
pub trait Transform2: Sized {
    /// Applies `f` to every defining point.
    #[must_use]
    fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(Point) -> Point;

    /// Rotates about `center` by `angle` degrees.
    #[must_use]
    fn rotate(&self, center: Point, angle: f64) -> Self {
        self.map_points(|p| p.rotate(center, angle))
    }

    /// Mirrors across `plane` through `center`.
    #[must_use]
    fn mirror(&self, center: Point, plane: MirrorPlane) -> Self {
        self.map_points(|p| p.mirror(center, plane))
    }

    /// Displaces by `vector`.
    #[must_use]
    fn translate(&self, vector: Vector) -> Self {
        self.map_points(|p| p + vector)
    }

    /// Scales about `center` with per-axis `factors`.
    #[must_use]
    fn scale(&self, center: Point, factors: Point) -> Self {
        self.map_points(|p| p.scale(center, factors))
    }

    /// Snaps every point to `grid`.
    #[must_use]
    fn ongrid(&self, grid: f64) -> Self {
        self.map_points(|p| p.ongrid(grid))
    }
}

impl Transform2 for Point {
    fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(Point) -> Point,
    {
        f(*self)
    }
}
