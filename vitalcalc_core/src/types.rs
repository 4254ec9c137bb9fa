//! Core domain types for Vitalcalc.
//!
//! This module defines the fundamental types used throughout the system:
//! - Calorie inputs and results
//! - BMI inputs, results and categories
//! - History entries tagged by origin

use crate::format::{parse_grams, parse_measurement, round1};
use crate::units::{HeightUnit, WeightUnit};
use crate::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Calorie Types
// ============================================================================

/// Macronutrient amounts in grams
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CalorieInput {
    pub carbs: f64,
    pub protein: f64,
    pub fats: f64,
}

impl CalorieInput {
    pub fn new(carbs: f64, protein: f64, fats: f64) -> Self {
        Self {
            carbs,
            protein,
            fats,
        }
    }

    /// Build an input from raw text fields
    ///
    /// Blank or unparseable fields count as 0 grams. Range checks happen
    /// later in [`crate::compute_calories`].
    pub fn from_raw(carbs: Option<&str>, protein: Option<&str>, fats: Option<&str>) -> Self {
        Self {
            carbs: parse_grams(carbs),
            protein: parse_grams(protein),
            fats: parse_grams(fats),
        }
    }
}

/// A computed calorie breakdown
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieResult {
    pub carbs: f64,
    pub protein: f64,
    pub fats: f64,
    pub total_calories: f64,
    pub carb_calories: f64,
    pub protein_calories: f64,
    pub fat_calories: f64,
    pub timestamp: DateTime<Utc>,
}

/// Share of total calories per macronutrient, in percent (one decimal)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacroPercentages {
    pub carbs: f64,
    pub protein: f64,
    pub fats: f64,
}

impl CalorieResult {
    /// Percentage of total calories contributed by each macronutrient
    pub fn percentages(&self) -> MacroPercentages {
        MacroPercentages {
            carbs: percent_of(self.carb_calories, self.total_calories),
            protein: percent_of(self.protein_calories, self.total_calories),
            fats: percent_of(self.fat_calories, self.total_calories),
        }
    }
}

pub(crate) fn percent_of(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        round1(part / total * 100.0)
    } else {
        0.0
    }
}

// ============================================================================
// BMI Types
// ============================================================================

/// Body measurements as entered by the user
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BmiInput {
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub height: f64,
    pub height_unit: HeightUnit,
}

impl BmiInput {
    pub fn new(weight: f64, weight_unit: WeightUnit, height: f64, height_unit: HeightUnit) -> Self {
        Self {
            weight,
            weight_unit,
            height,
            height_unit,
        }
    }

    /// Build an input from raw text fields
    ///
    /// Missing or non-numeric measurements are rejected immediately.
    pub fn from_raw(
        weight: Option<&str>,
        weight_unit: WeightUnit,
        height: Option<&str>,
        height_unit: HeightUnit,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            weight: parse_measurement(weight)?,
            weight_unit,
            height: parse_measurement(height)?,
            height_unit,
        })
    }
}

/// BMI classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    Normal,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese")]
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value
    ///
    /// Boundaries belong to the higher category: 18.5 is Normal weight,
    /// 25 is Overweight and 30 is Obese.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Lowercase identifier for styling
    pub fn slug(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A computed BMI
///
/// Weight and height are stored exactly as entered, in their original units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    pub weight: f64,
    pub height: f64,
    pub weight_unit: WeightUnit,
    pub height_unit: HeightUnit,
    pub bmi: f64,
    pub category: BmiCategory,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// History Types
// ============================================================================

/// Which history sequence a record belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HistoryKind {
    Calorie,
    Bmi,
}

impl HistoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryKind::Calorie => "calorie",
            HistoryKind::Bmi => "bmi",
        }
    }
}

/// A history record tagged with its origin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryEntry {
    Calorie(CalorieResult),
    Bmi(BmiResult),
}

impl HistoryEntry {
    pub fn kind(&self) -> HistoryKind {
        match self {
            HistoryEntry::Calorie(_) => HistoryKind::Calorie,
            HistoryEntry::Bmi(_) => HistoryKind::Bmi,
        }
    }

    /// When the underlying result was computed
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            HistoryEntry::Calorie(result) => result.timestamp,
            HistoryEntry::Bmi(result) => result.timestamp,
        }
    }

    pub fn as_calorie(&self) -> Option<&CalorieResult> {
        match self {
            HistoryEntry::Calorie(result) => Some(result),
            HistoryEntry::Bmi(_) => None,
        }
    }

    pub fn as_bmi(&self) -> Option<&BmiResult> {
        match self {
            HistoryEntry::Bmi(result) => Some(result),
            HistoryEntry::Calorie(_) => None,
        }
    }
}
