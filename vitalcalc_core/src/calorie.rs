//! Calorie engine.
//!
//! Converts macronutrient grams into calories using the fixed energy
//! densities of carbohydrate, protein and fat.

use crate::{CalorieInput, CalorieResult, ValidationError};
use chrono::{DateTime, Utc};

/// Energy density of carbohydrate (kcal per gram)
pub const CARB_KCAL_PER_GRAM: f64 = 4.0;
/// Energy density of protein (kcal per gram)
pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
/// Energy density of fat (kcal per gram)
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

/// Compute the calorie breakdown for a set of macronutrient amounts
///
/// Fails with [`ValidationError::Negative`] if any amount is negative or not
/// finite, and with [`ValidationError::AllZero`] if every amount is zero.
pub fn compute_calories(
    input: &CalorieInput,
    at: DateTime<Utc>,
) -> Result<CalorieResult, ValidationError> {
    let amounts = [input.carbs, input.protein, input.fats];

    if amounts.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(ValidationError::Negative);
    }
    if amounts.iter().all(|v| *v == 0.0) {
        return Err(ValidationError::AllZero);
    }

    let carb_calories = input.carbs * CARB_KCAL_PER_GRAM;
    let protein_calories = input.protein * PROTEIN_KCAL_PER_GRAM;
    let fat_calories = input.fats * FAT_KCAL_PER_GRAM;
    let total_calories = carb_calories + protein_calories + fat_calories;

    tracing::debug!(
        "Computed {:.1} kcal from {}g carbs, {}g protein, {}g fats",
        total_calories,
        input.carbs,
        input.protein,
        input.fats
    );

    Ok(CalorieResult {
        carbs: input.carbs,
        protein: input.protein,
        fats: input.fats,
        total_calories,
        carb_calories,
        protein_calories,
        fat_calories,
        timestamp: at,
    })
}
