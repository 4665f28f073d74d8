//! Model provider interface and artifact loading.
//!
//! The trained classifier is an externally supplied artifact. It is loaded
//! once at startup and shared read-only (behind [`Arc`]) by the batch and
//! single-patient predictors. The [`Classifier`] trait is the seam: any
//! provider exposing `predict` and `predict_proba` over the feature schema
//! can stand in for the bundled logistic model.

mod logistic;
pub use logistic::LogisticModel;

use crate::error::{PredictorError, Result};
use crate::schema::FeatureSchema;
use arrow::array::{Array, Float64Array};
use arrow::record_batch::RecordBatch;
use std::path::Path;
use std::sync::Arc;

/// A rows × feature-columns matrix handed to the classifier.
///
/// Row width always equals the number of columns; construction enforces it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Create a matrix from column names and row-major values
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(PredictorError::Prediction(format!(
                    "row {i} has {} values, expected {}",
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build a matrix from a projected feature batch (all `Float64` columns)
    pub fn from_batch(batch: &RecordBatch) -> Result<Self> {
        let columns: Vec<String> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();

        let mut column_arrays = Vec::with_capacity(batch.num_columns());
        for (field, array) in batch.schema().fields().iter().zip(batch.columns()) {
            let array = array
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| {
                    PredictorError::Prediction(format!(
                        "column '{}' is not Float64; validate the batch first",
                        field.name()
                    ))
                })?
                .clone();
            column_arrays.push(array);
        }

        let mut rows = Vec::with_capacity(batch.num_rows());
        for row in 0..batch.num_rows() {
            let mut values = Vec::with_capacity(column_arrays.len());
            for (array, name) in column_arrays.iter().zip(&columns) {
                if array.is_null(row) {
                    return Err(PredictorError::Prediction(format!(
                        "column '{name}' has a missing value at row {row}"
                    )));
                }
                values.push(array.value(row));
            }
            rows.push(values);
        }

        Self::new(columns, rows)
    }

    /// Column names, in matrix order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Row-major feature values
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Outcome of classifying one appointment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    /// 1 = predicted to attend, 0 = predicted no-show
    pub label: i64,
    /// Probability of attendance, in `[0, 1]`
    pub probability_present: f64,
}

impl PredictionResult {
    /// Probability of a no-show
    #[must_use]
    pub fn probability_absent(&self) -> f64 {
        1.0 - self.probability_present
    }

    /// Whether the model predicts attendance
    #[must_use]
    pub fn will_show(&self) -> bool {
        self.label == 1
    }
}

/// A trained binary attendance classifier.
///
/// Labels are 1 for "will show" and 0 for "no-show". `predict_proba` returns
/// `[p_absent, p_present]` per row.
pub trait Classifier: Send + Sync {
    /// The ordered feature columns this model was trained on
    fn feature_names(&self) -> &[String];

    /// Predict one label per matrix row
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<i64>>;

    /// Predict `[p_absent, p_present]` per matrix row
    fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<[f64; 2]>>;

    /// The feature schema derived from the model's training columns
    fn feature_schema(&self) -> Result<FeatureSchema> {
        FeatureSchema::new(self.feature_names().iter().cloned())
    }
}

/// Load the classifier artifact from a JSON file.
///
/// Any failure here (missing file, malformed JSON, inconsistent weights) is
/// a [`PredictorError::ModelLoad`] and disables all prediction features.
pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>> {
    let file = std::fs::File::open(path).map_err(|e| {
        PredictorError::ModelLoad(format!("cannot open '{}': {e}", path.display()))
    })?;
    let model: LogisticModel = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| {
            PredictorError::ModelLoad(format!("cannot parse '{}': {e}", path.display()))
        })?;
    model.check_consistency()?;
    log::info!(
        "Loaded attendance model with {} features from {}",
        model.feature_names().len(),
        path.display()
    );
    Ok(Arc::new(model))
}
