#![forbid(unsafe_code)]

//! Core domain model and business logic for Vitalcalc.
//!
//! This crate provides:
//! - Domain types (calorie and BMI inputs/results, history entries)
//! - Calorie and BMI engines with unit normalization
//! - Bounded history persistence over pluggable slot storage
//! - Chart series, formatting helpers and CSV export

pub mod types;
pub mod error;
pub mod units;
pub mod format;
pub mod calorie;
pub mod bmi;
pub mod chart;
pub mod config;
pub mod logging;
pub mod storage;
pub mod history;
pub mod engine;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result, ValidationError};
pub use types::*;
pub use units::{HeightUnit, WeightUnit};
pub use config::Config;
pub use calorie::compute_calories;
pub use bmi::compute_bmi;
pub use chart::{calorie_chart, ChartSlice};
pub use storage::{FileSlotStorage, MemorySlotStorage, SlotStorage};
pub use history::{HistoryStore, StoreConfig, HISTORY_LIMIT};
pub use engine::Engine;
pub use export::export_csv;
