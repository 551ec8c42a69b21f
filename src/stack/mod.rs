//! Process stack: named layers with a material and a vertical extent.

mod config;
mod layer;
mod unit;

pub use config::{LayerConfig, StackConfig};
pub use layer::Layer;
pub use unit::{Length, LengthUnit};

use crate::error::{Result, StackError};

/// Ordered, append-only collection of layers expressed in one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    unit: LengthUnit,
    layers: Vec<Layer>,
}

impl Stack {
    #[must_use]
    pub fn new(unit: LengthUnit) -> Self {
        Self {
            unit,
            layers: Vec::new(),
        }
    }

    /// Parses a JSON [`StackConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Config`] for malformed JSON and any error raised
    /// while building the layers.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StackConfig = serde_json::from_str(json).map_err(StackError::from)?;
        config.build()
    }

    #[must_use]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Appends `layer`, converting its heights to the stack unit.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::InvalidLayer`] if a layer with the same name
    /// already exists.
    pub fn push(&mut self, layer: Layer) -> Result<&Layer> {
        if self.layers.iter().any(|l| l.name() == layer.name()) {
            return Err(StackError::InvalidLayer {
                name: layer.name().to_owned(),
                reason: "duplicate layer name".into(),
            }
            .into());
        }
        let idx = self.layers.len();
        self.layers.push(layer.to_unit(self.unit));
        Ok(&self.layers[idx])
    }

    /// Looks a layer up by name.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::NotFound`] on a miss.
    pub fn get(&self, name: &str) -> Result<&Layer> {
        self.layers
            .iter()
            .find(|l| l.name() == name)
            .ok_or_else(|| StackError::NotFound(name.to_owned()).into())
    }

    /// Looks a layer up by position.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::IndexOutOfRange`] on a miss.
    pub fn at(&self, index: usize) -> Result<&Layer> {
        self.layers.get(index).ok_or_else(|| {
            StackError::IndexOutOfRange {
                index,
                len: self.layers.len(),
            }
            .into()
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    fn stack() -> Stack {
        let mut stack = Stack::new(LengthUnit::Nanometre);
        stack
            .push(Layer::from_zmin_thickness("M1", "copper", 0.0, 0.2, LengthUnit::Micrometre).unwrap())
            .unwrap();
        stack
            .push(Layer::from_zmin_thickness("V1", "tungsten", 200.0, 100.0, LengthUnit::Nanometre).unwrap())
            .unwrap();
        stack
    }

    #[test]
    fn push_converts_units() {
        let stack = stack();
        let m1 = stack.get("M1").unwrap();
        assert_eq!(m1.unit(), LengthUnit::Nanometre);
        assert_eq!(m1.zmax(), 200.0);
        assert_eq!(stack.at(1).unwrap().name(), "V1");
    }

    #[test]
    fn lookup_misses() {
        let stack = stack();
        assert!(matches!(
            stack.get("M9").unwrap_err(),
            LayoutError::Stack(StackError::NotFound(ref n)) if n == "M9"
        ));
        assert!(matches!(
            stack.at(5).unwrap_err(),
            LayoutError::Stack(StackError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut stack = stack();
        let again = Layer::from_range("M1", "gold", 0.0, 1.0, LengthUnit::Nanometre).unwrap();
        assert!(stack.push(again).is_err());
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn iteration_keeps_order() {
        let stack = stack();
        let names: Vec<&str> = stack.iter().map(Layer::name).collect();
        assert_eq!(names, ["M1", "V1"]);
    }
}
