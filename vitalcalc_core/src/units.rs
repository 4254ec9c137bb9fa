//! Measurement units and conversion constants
//!
//! Weight and height are always normalized to kilograms and meters before
//! a BMI is computed. The units a user entered are kept on the record.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Conversion Constants
// ============================================================================

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462;
/// Meters per foot
pub const METERS_PER_FOOT: f64 = 0.3048;
/// Centimeters per meter
pub const CM_PER_METER: f64 = 100.0;

// ============================================================================
// Weight
// ============================================================================

/// Unit a body weight was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert a weight in this unit to kilograms
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value / LBS_PER_KG,
        }
    }

    /// Short unit label ("kg", "lbs")
    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    /// Input prompt for a weight in this unit
    pub fn placeholder(self) -> &'static str {
        match self {
            WeightUnit::Kg => "Enter weight in kg",
            WeightUnit::Lbs => "Enter weight in lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            other => Err(Error::Other(format!("Unknown weight unit: {}", other))),
        }
    }
}

// ============================================================================
// Height
// ============================================================================

/// Unit a height was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    M,
    Ft,
    Cm,
}

impl HeightUnit {
    /// Convert a height in this unit to meters
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            HeightUnit::M => value,
            HeightUnit::Ft => value * METERS_PER_FOOT,
            HeightUnit::Cm => value / CM_PER_METER,
        }
    }

    /// Short unit label ("m", "ft", "cm")
    pub fn as_str(self) -> &'static str {
        match self {
            HeightUnit::M => "m",
            HeightUnit::Ft => "ft",
            HeightUnit::Cm => "cm",
        }
    }

    /// Input prompt for a height in this unit
    pub fn placeholder(self) -> &'static str {
        match self {
            HeightUnit::M => "Enter height in meters",
            HeightUnit::Ft => "Enter height in feet",
            HeightUnit::Cm => "Enter height in cm",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeightUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" => Ok(HeightUnit::M),
            "ft" | "foot" | "feet" => Ok(HeightUnit::Ft),
            "cm" | "centimeter" | "centimeters" => Ok(HeightUnit::Cm),
            other => Err(Error::Other(format!("Unknown height unit: {}", other))),
        }
    }
}
