//! Error handling for the attendance predictor.

use itertools::Itertools;
use std::io;

/// Specialized error type for prediction operations
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// Model artifact missing, unreadable, or internally inconsistent.
    /// Fatal to all prediction features.
    #[error("model load failed: {0}")]
    ModelLoad(String),

    /// Uploaded dataset is missing required feature columns
    #[error("dataset is missing required columns: {}", .missing.iter().join(", "))]
    SchemaMismatch {
        /// The schema columns absent from the dataset, in schema order
        missing: Vec<String>,
    },

    /// The classifier failed during inference
    #[error("prediction failed: {0}")]
    Prediction(String),

    /// Form or configuration value outside its allowed range
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Result type for predictor operations
pub type Result<T> = std::result::Result<T, PredictorError>;
