//! Calculator entry points used by front ends.
//!
//! Each calculation validates its input, computes the result and records it
//! in the history. Nothing is written when validation fails.

use crate::{
    compute_bmi, compute_calories, BmiInput, BmiResult, CalorieInput, CalorieResult,
    HistoryEntry, HistoryStore, Result, SlotStorage,
};
use chrono::Utc;

/// Calorie and BMI calculators sharing one history store
#[derive(Debug)]
pub struct Engine<S> {
    store: HistoryStore<S>,
}

impl<S: SlotStorage> Engine<S> {
    pub fn new(store: HistoryStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &HistoryStore<S> {
        &self.store
    }

    /// Compute a calorie breakdown and append it to the calorie history
    pub fn calculate_calories(&mut self, input: &CalorieInput) -> Result<CalorieResult> {
        let result = compute_calories(input, Utc::now())?;
        self.store.append_calorie(&result)?;

        tracing::info!("Calculated {:.1} kcal", result.total_calories);
        Ok(result)
    }

    /// Compute a BMI and append it to the BMI history
    pub fn calculate_bmi(&mut self, input: &BmiInput) -> Result<BmiResult> {
        let result = compute_bmi(input, Utc::now())?;
        self.store.append_bmi(&result)?;

        tracing::info!("Calculated BMI {:.1} ({})", result.bmi, result.category);
        Ok(result)
    }

    /// Combined history, newest first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.store.load_all()
    }

    /// Remove all saved results
    pub fn clear_history(&mut self) -> Result<()> {
        self.store.clear()
    }
}
