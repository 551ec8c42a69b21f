use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StackError};

use super::{Layer, LengthUnit, Stack};

/// Serialised form of a [`Stack`].
///
/// ```json
/// { "unit": "nm",
///   "layers": [ { "name": "M1", "material": "copper", "zmin": 0, "thickness": 250 } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    pub unit: LengthUnit,
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

/// One layer entry. Exactly two of `zmin`, `zmax` and `thickness` are set;
/// `unit` defaults to the stack unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub name: String,
    pub material: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zmin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zmax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<LengthUnit>,
}

impl LayerConfig {
    /// Routes the entry to the matching [`Layer`] constructor.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::InvalidLayer`] unless exactly two heights are given.
    pub fn build(&self, default_unit: LengthUnit) -> Result<Layer> {
        let unit = self.unit.unwrap_or(default_unit);
        let (name, material) = (self.name.as_str(), self.material.as_str());
        match (self.zmin, self.zmax, self.thickness) {
            (Some(zmin), Some(zmax), None) => Layer::from_range(name, material, zmin, zmax, unit),
            (Some(zmin), None, Some(t)) => Layer::from_zmin_thickness(name, material, zmin, t, unit),
            (None, Some(zmax), Some(t)) => Layer::from_zmax_thickness(name, material, zmax, t, unit),
            _ => Err(StackError::InvalidLayer {
                name: self.name.clone(),
                reason: "exactly two of zmin, zmax and thickness are required".into(),
            }
            .into()),
        }
    }
}

impl StackConfig {
    /// Builds the stack, converting every layer to the stack unit.
    ///
    /// # Errors
    ///
    /// Propagates layer construction errors and duplicate names.
    pub fn build(&self) -> Result<Stack> {
        let mut stack = Stack::new(self.unit);
        for entry in &self.layers {
            stack.push(entry.build(self.unit)?)?;
        }
        debug!(unit = %self.unit, layers = stack.len(), "stack loaded");
        Ok(stack)
    }
}

impl From<&Stack> for StackConfig {
    fn from(stack: &Stack) -> Self {
        Self {
            unit: stack.unit(),
            layers: stack
                .iter()
                .map(|l| LayerConfig {
                    name: l.name().to_owned(),
                    material: l.material().to_owned(),
                    zmin: Some(l.zmin()),
                    zmax: Some(l.zmax()),
                    thickness: None,
                    unit: None,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    const JSON: &str = r#"{
        "unit": "nm",
        "layers": [
            { "name": "M1", "material": "copper", "zmin": 0, "thickness": 250 },
            { "name": "V1", "material": "tungsten", "zmin": 250, "zmax": 400 },
            { "name": "M2", "material": "copper", "zmax": 1.0, "thickness": 0.6, "unit": "um" }
        ]
    }"#;

    #[test]
    fn loads_all_three_forms() {
        let stack = Stack::from_json(JSON).unwrap();
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.get("M1").unwrap().zmax(), 250.0);
        assert_eq!(stack.get("V1").unwrap().thickness(), 150.0);
        let m2 = stack.get("M2").unwrap();
        assert!((m2.zmin() - 400.0).abs() < 1e-9);
        assert_eq!(m2.zmax(), 1000.0);
    }

    #[test]
    fn over_specified_layer_rejected() {
        let json = r#"{ "unit": "nm", "layers": [
            { "name": "M1", "material": "copper", "zmin": 0, "zmax": 1, "thickness": 1 } ] }"#;
        let err = Stack::from_json(json).unwrap_err();
        assert!(matches!(err, LayoutError::Stack(StackError::InvalidLayer { .. })));
    }

    #[test]
    fn bad_unit_and_bad_json() {
        let err = Stack::from_json(r#"{ "unit": "mm", "layers": [] }"#).unwrap_err();
        assert!(matches!(err, LayoutError::Stack(StackError::Config(_))));
        assert!(Stack::from_json("{").is_err());
    }

    #[test]
    fn round_trips_through_config() {
        let stack = Stack::from_json(JSON).unwrap();
        let json = serde_json::to_string(&StackConfig::from(&stack)).unwrap();
        assert_eq!(Stack::from_json(&json).unwrap(), stack);
    }
}
