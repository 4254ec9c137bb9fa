//! CSV export of the combined history.

use crate::{HistoryEntry, Result};
use std::path::Path;

/// A row in the CSV output
///
/// Calorie and BMI records share one layout; columns that do not apply to
/// a record are left empty.
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: &'static str,
    timestamp: String,
    carbs: Option<f64>,
    protein: Option<f64>,
    fats: Option<f64>,
    total_calories: Option<f64>,
    weight: Option<f64>,
    weight_unit: Option<&'static str>,
    height: Option<f64>,
    height_unit: Option<&'static str>,
    bmi: Option<f64>,
    category: Option<&'static str>,
}

impl From<&HistoryEntry> for CsvRow {
    fn from(entry: &HistoryEntry) -> Self {
        let mut row = CsvRow {
            kind: entry.kind().as_str(),
            timestamp: entry.timestamp().to_rfc3339(),
            carbs: None,
            protein: None,
            fats: None,
            total_calories: None,
            weight: None,
            weight_unit: None,
            height: None,
            height_unit: None,
            bmi: None,
            category: None,
        };

        match entry {
            HistoryEntry::Calorie(result) => {
                row.carbs = Some(result.carbs);
                row.protein = Some(result.protein);
                row.fats = Some(result.fats);
                row.total_calories = Some(result.total_calories);
            }
            HistoryEntry::Bmi(result) => {
                row.weight = Some(result.weight);
                row.weight_unit = Some(result.weight_unit.as_str());
                row.height = Some(result.height);
                row.height_unit = Some(result.height_unit.as_str());
                row.bmi = Some(result.bmi);
                row.category = Some(result.category.label());
            }
        }

        row
    }
}

/// Write history entries to a CSV file, replacing any existing file
///
/// Returns the number of rows written.
pub fn export_csv(entries: &[HistoryEntry], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    for entry in entries {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    tracing::info!("Exported {} history entries to {:?}", entries.len(), path);

    Ok(entries.len())
}
