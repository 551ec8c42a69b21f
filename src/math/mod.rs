pub mod arc_2d;
pub mod intersect_2d;
pub mod point;
pub mod polygon_2d;
pub mod root;

use serde::{Deserialize, Serialize};

pub use point::{Point, Vector};
pub use root::{Newton, RootFinder, Secant};

use crate::stack::LengthUnit;

/// 3D point type used for extruded output.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type used for mesh normals.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Squared disagreement between the two derivations of a line intersection
/// above which a numeric-accuracy warning is raised.
pub const INTERSECTION_CROSS_CHECK: f64 = 1e-24;

/// Default grid used to round and deduplicate emitted vertices.
pub const DEFAULT_GRID: f64 = 1e-6;

/// Kernel-wide settings fixed before a recipe produces geometry.
///
/// Geometry coordinates are assumed to already be expressed in `unit`;
/// `grid` is the snap and deduplication tolerance applied by emitters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    pub unit: LengthUnit,
    pub grid: f64,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            unit: LengthUnit::Micrometre,
            grid: DEFAULT_GRID,
        }
    }
}

impl KernelConfig {
    /// Creates a configuration with the default grid for the given unit.
    #[must_use]
    pub fn new(unit: LengthUnit) -> Self {
        Self {
            unit,
            grid: DEFAULT_GRID,
        }
    }

    /// Returns a copy with a different snap grid.
    #[must_use]
    pub fn with_grid(mut self, grid: f64) -> Self {
        self.grid = grid;
        self
    }
}
