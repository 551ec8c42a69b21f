use serde::Serialize;

use crate::error::{Result, StackError};

use super::LengthUnit;

/// A named material slab between `zmin` and `zmax`.
///
/// Heights are stored in `unit`; `zmin <= zmax` holds for every constructed
/// layer and the thickness is always derived as `zmax - zmin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    name: String,
    material: String,
    zmin: f64,
    zmax: f64,
    unit: LengthUnit,
}

impl Layer {
    /// Layer spanning `zmin..zmax`.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::InvalidLayer`] for non-finite heights, an
    /// inverted range or an empty name.
    pub fn from_range(
        name: impl Into<String>,
        material: impl Into<String>,
        zmin: f64,
        zmax: f64,
        unit: LengthUnit,
    ) -> Result<Self> {
        let layer = Self {
            name: name.into(),
            material: material.into(),
            zmin,
            zmax,
            unit,
        };
        layer.validate()?;
        Ok(layer)
    }

    /// Layer of `thickness` sitting on `zmin`.
    ///
    /// # Errors
    ///
    /// As [`Layer::from_range`]; a negative thickness is rejected.
    pub fn from_zmin_thickness(
        name: impl Into<String>,
        material: impl Into<String>,
        zmin: f64,
        thickness: f64,
        unit: LengthUnit,
    ) -> Result<Self> {
        let name = name.into();
        check_thickness(&name, thickness)?;
        Self::from_range(name, material, zmin, zmin + thickness, unit)
    }

    /// Layer of `thickness` hanging below `zmax`.
    ///
    /// # Errors
    ///
    /// As [`Layer::from_range`]; a negative thickness is rejected.
    pub fn from_zmax_thickness(
        name: impl Into<String>,
        material: impl Into<String>,
        zmax: f64,
        thickness: f64,
        unit: LengthUnit,
    ) -> Result<Self> {
        let name = name.into();
        check_thickness(&name, thickness)?;
        Self::from_range(name, material, zmax - thickness, zmax, unit)
    }

    fn validate(&self) -> Result<()> {
        let reason = if self.name.is_empty() {
            Some("empty name".to_owned())
        } else if !(self.zmin.is_finite() && self.zmax.is_finite()) {
            Some(format!("non-finite z range {}..{}", self.zmin, self.zmax))
        } else if self.zmin > self.zmax {
            Some(format!("zmin {} above zmax {}", self.zmin, self.zmax))
        } else {
            None
        };
        match reason {
            Some(reason) => Err(StackError::InvalidLayer {
                name: self.name.clone(),
                reason,
            }
            .into()),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn material(&self) -> &str {
        &self.material
    }

    #[must_use]
    pub fn zmin(&self) -> f64 {
        self.zmin
    }

    #[must_use]
    pub fn zmax(&self) -> f64 {
        self.zmax
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.zmax - self.zmin
    }

    #[must_use]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// The same layer with heights re-expressed in `unit`.
    #[must_use]
    pub fn to_unit(&self, unit: LengthUnit) -> Self {
        Self {
            name: self.name.clone(),
            material: self.material.clone(),
            zmin: self.unit.convert(self.zmin, unit),
            zmax: self.unit.convert(self.zmax, unit),
            unit,
        }
    }
}

fn check_thickness(name: &str, thickness: f64) -> Result<()> {
    if thickness >= 0.0 && thickness.is_finite() {
        Ok(())
    } else {
        Err(StackError::InvalidLayer {
            name: name.to_owned(),
            reason: format!("thickness {thickness} must be non-negative"),
        }
        .into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn three_constructors_agree() {
        let nm = LengthUnit::Nanometre;
        let a = Layer::from_range("M1", "copper", 100.0, 350.0, nm).unwrap();
        let b = Layer::from_zmin_thickness("M1", "copper", 100.0, 250.0, nm).unwrap();
        let c = Layer::from_zmax_thickness("M1", "copper", 350.0, 250.0, nm).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.thickness(), 250.0);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = Layer::from_range("M1", "copper", 2.0, 1.0, LengthUnit::Micrometre).unwrap_err();
        assert!(err.to_string().contains("zmin 2 above zmax 1"));
    }

    #[test]
    fn rejects_negative_thickness() {
        assert!(Layer::from_zmin_thickness("V1", "tungsten", 0.0, -1.0, LengthUnit::Nanometre).is_err());
        assert!(Layer::from_zmax_thickness("V1", "tungsten", 0.0, f64::NAN, LengthUnit::Nanometre).is_err());
        assert!(Layer::from_range("", "oxide", 0.0, 1.0, LengthUnit::Nanometre).is_err());
    }

    #[test]
    fn unit_conversion() {
        let layer = Layer::from_range("M2", "aluminium", 1.0, 1.5, LengthUnit::Micrometre).unwrap();
        let nm = layer.to_unit(LengthUnit::Nanometre);
        assert_eq!(nm.zmin(), 1000.0);
        assert_eq!(nm.zmax(), 1500.0);
        assert_eq!(nm.unit(), LengthUnit::Nanometre);
    }

    proptest! {
        #[test]
        fn thickness_is_range(zmin in -1e4..1e4f64, t in 0.0..1e4f64) {
            let layer = Layer::from_zmin_thickness("L", "m", zmin, t, LengthUnit::Nanometre).unwrap();
            prop_assert!(layer.zmin() <= layer.zmax());
            prop_assert_eq!(layer.thickness(), layer.zmax() - layer.zmin());
            let ulp = 2.0 * f64::EPSILON * layer.zmax().abs().max(layer.zmin().abs()).max(1.0);
            prop_assert!((layer.thickness() - t).abs() <= ulp);
        }
    }
}
