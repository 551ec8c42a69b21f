use tracing::{debug, info};

use crate::error::{EmitError, Result};
use crate::geometry::{Polygon, PolygonSet};
use crate::math::KernelConfig;
use crate::stack::Layer;

use super::{EmitRecord, Emitter, ExtrudedShape, ShapeNamer};

/// Ordered collection of extruded shapes produced by one recipe run.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    config: KernelConfig,
    namer: ShapeNamer,
    shapes: Vec<ExtrudedShape>,
}

impl Layout {
    #[must_use]
    pub fn new(config: KernelConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    #[must_use]
    pub fn shapes(&self) -> &[ExtrudedShape] {
        &self.shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Adds every polygon of `polygons` on `layer`, auto-named from `prefix`.
    ///
    /// Layer heights are converted to the layout unit. Returns the names
    /// assigned, in order.
    pub fn add(
        &mut self,
        component: &str,
        prefix: &str,
        polygons: impl Into<PolygonSet>,
        layer: &Layer,
    ) -> Vec<String> {
        let layer = layer.to_unit(self.config.unit);
        polygons
            .into()
            .into_iter()
            .map(|footprint| {
                let name = self.namer.next(prefix);
                self.shapes
                    .push(ExtrudedShape::new(component, name.clone(), &layer, footprint));
                name
            })
            .collect()
    }

    /// Adds one polygon under an explicit name.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError::DuplicateName`] if `name` is already taken.
    pub fn add_named(
        &mut self,
        component: &str,
        name: &str,
        footprint: Polygon,
        layer: &Layer,
    ) -> Result<()> {
        if self.shapes.iter().any(|s| s.name == name) {
            return Err(EmitError::DuplicateName(name.to_owned()).into());
        }
        let layer = layer.to_unit(self.config.unit);
        self.shapes
            .push(ExtrudedShape::new(component, name, &layer, footprint));
        Ok(())
    }

    /// Restarts auto-naming; shapes already added keep their names.
    pub fn reset_names(&mut self) {
        self.namer.reset();
    }

    /// Builds every record, then hands them to `emitter` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns the first footprint or naming error before anything is
    /// emitted, or the first emitter error.
    pub fn emit<E: Emitter + ?Sized>(&self, emitter: &mut E) -> Result<usize> {
        let mut seen = std::collections::HashSet::new();
        let records = self
            .shapes
            .iter()
            .map(|shape| {
                if !seen.insert(shape.name.as_str()) {
                    return Err(EmitError::DuplicateName(shape.name.clone()).into());
                }
                shape.record(&self.config)
            })
            .collect::<Result<Vec<EmitRecord>>>()?;
        debug!(shapes = records.len(), unit = %self.config.unit, "layout validated");
        for record in &records {
            emitter.emit(record)?;
        }
        info!(shapes = records.len(), "layout emitted");
        Ok(records.len())
    }
}
