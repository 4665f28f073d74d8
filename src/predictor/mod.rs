//! Batch and single-patient prediction over the shared classifier.

pub mod batch;
pub mod single;

pub use batch::{BatchPrediction, BatchPredictor};
pub use single::{SinglePrediction, SinglePredictor};
