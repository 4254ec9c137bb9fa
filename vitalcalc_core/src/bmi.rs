//! BMI engine.
//!
//! Measurements are normalized to kilograms and meters for the formula
//! only; the returned record keeps what the user entered.

use crate::{BmiCategory, BmiInput, BmiResult, ValidationError};
use chrono::{DateTime, Utc};

/// Compute a BMI from weight and height in any supported unit
pub fn compute_bmi(input: &BmiInput, at: DateTime<Utc>) -> Result<BmiResult, ValidationError> {
    if !is_positive(input.weight) || !is_positive(input.height) {
        return Err(ValidationError::InvalidMeasurement);
    }

    let weight_kg = input.weight_unit.to_kg(input.weight);
    let height_m = input.height_unit.to_meters(input.height);
    let bmi = weight_kg / (height_m * height_m);
    let category = BmiCategory::from_bmi(bmi);

    tracing::debug!(
        "BMI {:.2} ({}) from {:.2} kg / {:.3} m",
        bmi,
        category,
        weight_kg,
        height_m
    );

    Ok(BmiResult {
        weight: input.weight,
        height: input.height,
        weight_unit: input.weight_unit,
        height_unit: input.height_unit,
        bmi,
        category,
        timestamp: at,
    })
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
