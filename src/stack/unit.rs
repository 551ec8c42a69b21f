use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, StackError};

/// Length unit of layout coordinates and layer heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LengthUnit {
    Angstrom,
    Nanometre,
    Micrometre,
}

impl LengthUnit {
    /// Power of ten of one unit in metres.
    #[must_use]
    pub fn exponent(self) -> i32 {
        match self {
            Self::Angstrom => -10,
            Self::Nanometre => -9,
            Self::Micrometre => -6,
        }
    }

    /// Size of one unit in metres.
    #[must_use]
    pub fn metres(self) -> f64 {
        10f64.powi(self.exponent())
    }

    /// Short symbol used in configuration files.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Angstrom => "A",
            Self::Nanometre => "nm",
            Self::Micrometre => "um",
        }
    }

    /// Re-expresses `value` given in `self` in unit `to`.
    ///
    /// Scaling goes through an integral power of ten, so conversions towards
    /// a smaller unit are exact for integral inputs.
    #[must_use]
    pub fn convert(self, value: f64, to: Self) -> f64 {
        let shift = self.exponent() - to.exponent();
        match shift {
            0 => value,
            s if s > 0 => value * 10f64.powi(s),
            s => value / 10f64.powi(-s),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "Å" | "angstrom" | "angstroms" => Ok(Self::Angstrom),
            "n" | "nm" | "nanometre" | "nanometres" | "nanometer" | "nanometers" => {
                Ok(Self::Nanometre)
            }
            "u" | "um" | "µm" | "μm" | "micrometre" | "micrometres" | "micrometer"
            | "micrometers" | "micron" | "microns" => Ok(Self::Micrometre),
            other => Err(StackError::InvalidUnit(other.to_owned()).into()),
        }
    }
}

impl TryFrom<String> for LengthUnit {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LengthUnit> for String {
    fn from(unit: LengthUnit) -> Self {
        unit.symbol().to_owned()
    }
}

/// A quantity tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    #[must_use]
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    #[must_use]
    pub fn angstrom(value: f64) -> Self {
        Self::new(value, LengthUnit::Angstrom)
    }

    #[must_use]
    pub fn nm(value: f64) -> Self {
        Self::new(value, LengthUnit::Nanometre)
    }

    #[must_use]
    pub fn um(value: f64) -> Self {
        Self::new(value, LengthUnit::Micrometre)
    }

    /// Value expressed in `unit`.
    #[must_use]
    pub fn in_unit(self, unit: LengthUnit) -> f64 {
        self.unit.convert(self.value, unit)
    }
}
