//! A Rust library for predicting medical appointment attendance, with
//! feature-schema validation and daily capacity planning.
//!
//! The trained classifier is an external artifact loaded once at startup;
//! everything else is constructed fresh per interaction. Two independent
//! paths share the classifier handle: the batch path (CSV upload →
//! validation → prediction → summary → capacity check) and the
//! single-patient path (form → encoding → prediction, with a booking
//! verdict when the batch path already measured the day's capacity).

pub mod capacity;
pub mod config;
pub mod encoder;
pub mod error;
pub mod model;
pub mod predictor;
pub mod reader;
pub mod schema;
pub mod summary;

// Re-export the most common types for easier use
// Core types
pub use capacity::{CapacityState, CapacityVerdict, MAX_CAPACITY, MIN_CAPACITY};
pub use config::PredictorConfig;
pub use encoder::{Gender, PatientForm, Weekday};
pub use error::{PredictorError, Result};
pub use model::{Classifier, FeatureMatrix, LogisticModel, PredictionResult, load_classifier};
pub use predictor::{BatchPrediction, BatchPredictor, SinglePrediction, SinglePredictor};
pub use reader::read_appointments_csv;
pub use schema::FeatureSchema;
pub use summary::DailySummary;

// Arrow types
pub use arrow::record_batch::RecordBatch;
