//! Planar geometry kernel for parameterised electromagnetic layout generation.
//!
//! Layouts are composed from 2-D primitives ([`geometry`]), combined with the
//! constructive [`operations`] (thickening, Booleans, blending), tagged with a
//! [`stack`] layer and handed to an [`emit`] backend as extruded shapes.

pub mod emit;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod recipes;
pub mod stack;
pub mod tessellation;

pub use error::{LayoutError, Result};
pub use geometry::{
    Bounds, Intersection, Line, MirrorPlane, Path, PathBuilder, Polygon, PolygonBuilder,
    PolygonSet, Segment, Transform2,
};
pub use math::{KernelConfig, Point, Vector};
