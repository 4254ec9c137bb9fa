//! Proportional chart series for a calorie breakdown.
//!
//! The core only decides what goes into the chart. Drawing it is up to
//! the caller.

use crate::types::percent_of;
use crate::CalorieResult;

/// One slice of the calorie chart
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSlice {
    pub label: &'static str,
    pub calories: f64,
    /// Share of total calories, one decimal
    pub percentage: f64,
    /// Hex colour, e.g. "#00d4ff"
    pub color: &'static str,
}

const SERIES: [(&str, &str); 3] = [
    ("Carbohydrates", "#00d4ff"),
    ("Proteins", "#00ff88"),
    ("Fats", "#ff9500"),
];

/// Build the chart slices for a result, skipping macronutrients with no calories
pub fn calorie_chart(result: &CalorieResult) -> Vec<ChartSlice> {
    let total = result.total_calories;
    if total <= 0.0 {
        return Vec::new();
    }

    let values = [
        result.carb_calories,
        result.protein_calories,
        result.fat_calories,
    ];

    SERIES
        .iter()
        .zip(values)
        .filter(|(_, calories)| *calories > 0.0)
        .map(|(&(label, color), calories)| ChartSlice {
            label,
            calories,
            percentage: percent_of(calories, total),
            color,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_calories, CalorieInput};
    use chrono::Utc;

    #[test]
    fn test_all_slices_in_order() {
        let result = compute_calories(&CalorieInput::new(100.0, 50.0, 20.0), Utc::now()).unwrap();
        let slices = calorie_chart(&result);

        let labels: Vec<_> = slices.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Carbohydrates", "Proteins", "Fats"]);
        assert_eq!(slices[0].calories, 400.0);
        assert_eq!(slices[2].color, "#ff9500");
    }

    #[test]
    fn test_zero_components_omitted() {
        let result = compute_calories(&CalorieInput::new(0.0, 30.0, 0.0), Utc::now()).unwrap();
        let slices = calorie_chart(&result);

        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, "Proteins");
        assert_eq!(slices[0].percentage, 100.0);
    }

    #[test]
    fn test_empty_when_no_calories() {
        let mut result =
            compute_calories(&CalorieInput::new(1.0, 0.0, 0.0), Utc::now()).unwrap();
        result.carb_calories = 0.0;
        result.total_calories = 0.0;
        assert!(calorie_chart(&result).is_empty());
    }
}
