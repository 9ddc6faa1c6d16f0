//! Pipeline error types.
//!
//! Load-time problems are `DataValidationError`s and reject the whole
//! dataset. Queries over empty or single-kiosk subsets are not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataValidationError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Non-finite coordinate for kiosk {kiosk_id}: ({latitude}, {longitude})")]
    NonFiniteCoordinate {
        kiosk_id: String,
        latitude: f64,
        longitude: f64,
    },

    #[error("Non-finite avg_volume for kiosk {0}")]
    NonFiniteVolume(String),

    #[error("Negative transaction count for kiosk {kiosk_id}: {value}")]
    NegativeCount { kiosk_id: String, value: i64 },

    #[error("Duplicate kiosk_id: {0}")]
    DuplicateKioskId(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Data validation failed: {0}")]
    Validation(#[from] DataValidationError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Write failed: {0}")]
    Output(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
