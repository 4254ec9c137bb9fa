//! Error types for the vitalcalc_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Rejected calculator input
///
/// The messages are meant to be shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A macronutrient amount was negative or not a finite number
    #[error("Please enter valid positive numbers")]
    Negative,

    /// Every macronutrient amount was zero
    #[error("Please enter at least one macronutrient value")]
    AllZero,

    /// Weight or height was missing, non-numeric or not positive
    #[error("Please enter valid weight and height values")]
    InvalidMeasurement,
}

/// Core error type for vitalcalc_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before any computation or store mutation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Writing a history slot failed; the new record was not saved
    #[error("Failed to persist history slot '{slot}': {source}")]
    Persistence {
        slot: String,
        #[source]
        source: Box<Error>,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns the validation failure, if this is one
    pub fn as_validation(&self) -> Option<ValidationError> {
        match self {
            Error::Validation(e) => Some(*e),
            _ => None,
        }
    }
}
