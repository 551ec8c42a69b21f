use serde::Serialize;

use crate::error::{EmitError, Result};
use crate::geometry::{Polygon, Transform2};
use crate::math::point::snap;
use crate::math::{KernelConfig, Point};
use crate::stack::{Layer, LengthUnit};

/// A footprint extruded through the z extent of a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudedShape {
    pub component: String,
    pub name: String,
    pub material: String,
    pub zmin: f64,
    pub zmax: f64,
    pub footprint: Polygon,
}

impl ExtrudedShape {
    /// Takes material and z extent from `layer`, as stored.
    #[must_use]
    pub fn new(
        component: impl Into<String>,
        name: impl Into<String>,
        layer: &Layer,
        footprint: Polygon,
    ) -> Self {
        Self {
            component: component.into(),
            name: name.into(),
            material: layer.material().to_owned(),
            zmin: layer.zmin(),
            zmax: layer.zmax(),
            footprint,
        }
    }

    /// Snaps the footprint and z extent to the grid, culls repeated vertices and produces
    /// the record handed to emitters.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError::DegenerateFootprint`] when fewer than three
    /// distinct vertices survive.
    pub fn record(&self, config: &KernelConfig) -> Result<EmitRecord> {
        let vertices = cull_repeats(self.footprint.ongrid(config.grid).points());
        if vertices.len() < 3 {
            return Err(EmitError::DegenerateFootprint {
                name: self.name.clone(),
                vertices: vertices.len(),
            }
            .into());
        }
        Ok(EmitRecord {
            component: self.component.clone(),
            name: self.name.clone(),
            material: self.material.clone(),
            unit: config.unit,
            zmin: snap(self.zmin, config.grid),
            zmax: snap(self.zmax, config.grid),
            vertices,
        })
    }
}

/// Drops consecutive duplicates and a repeated closing vertex.
pub(crate) fn cull_repeats(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// Uniform per-object description consumed by emitters.
///
/// The closing edge is implicit; coordinates are on the kernel grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitRecord {
    pub component: String,
    pub name: String,
    pub material: String,
    pub unit: LengthUnit,
    pub zmin: f64,
    pub zmax: f64,
    pub vertices: Vec<Point>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn layer() -> Layer {
        Layer::from_range("M1", "copper", 0.0, 0.5, LengthUnit::Micrometre).unwrap()
    }

    #[test]
    fn culls_and_snaps() {
        let footprint = Polygon::new(vec![
            p(0.0, 0.0),
            p(1.000_000_2, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(0.0, 1.0),
            p(0.000_000_1, 0.0),
        ]);
        let shape = ExtrudedShape::new("inductor", "Brick1", &layer(), footprint);
        let record = shape.record(&KernelConfig::default()).unwrap();
        assert_eq!(
            record.vertices,
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
        );
        assert_eq!(record.material, "copper");
        assert_eq!((record.zmin, record.zmax), (0.0, 0.5));
    }

    #[test]
    fn z_extent_snapped_to_grid() {
        let mut shape = ExtrudedShape::new(
            "inductor",
            "Brick3",
            &layer(),
            Polygon::rectangle(p(0.0, 0.0), p(1.0, 1.0)),
        );
        shape.zmin = 0.100_000_000_3;
        shape.zmax = 0.399_999_999_8;
        let record = shape.record(&KernelConfig::default()).unwrap();
        assert_eq!((record.zmin, record.zmax), (0.1, 0.4));
    }

    #[test]
    fn degenerate_after_snap() {
        let sliver = Polygon::new(vec![p(0.0, 0.0), p(1e-8, 0.0), p(0.0, 2e-8)]);
        let shape = ExtrudedShape::new("inductor", "Brick2", &layer(), sliver);
        let err = shape.record(&KernelConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Brick2"));
    }

    #[test]
    fn record_serialises_flat() {
        let shape = ExtrudedShape::new(
            "c",
            "n",
            &layer(),
            Polygon::rectangle(p(0.0, 0.0), p(1.0, 1.0)),
        );
        let json = serde_json::to_value(shape.record(&KernelConfig::default()).unwrap()).unwrap();
        assert_eq!(json["unit"], "um");
        assert_eq!(json["vertices"][2]["x"], 1.0);
    }
}
