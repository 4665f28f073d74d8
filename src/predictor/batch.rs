//! Batch prediction over an uploaded appointment table.

use crate::capacity::CapacityState;
use crate::config::PredictorConfig;
use crate::error::{PredictorError, Result};
use crate::model::{Classifier, FeatureMatrix};
use crate::schema::FeatureSchema;
use crate::summary::DailySummary;
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use std::sync::Arc;

/// Runs the classifier over a whole day's appointment table.
///
/// The classifier handle is shared, read-only state; the predictor itself
/// is constructed fresh per interaction.
pub struct BatchPredictor {
    classifier: Arc<dyn Classifier>,
    schema: FeatureSchema,
    config: PredictorConfig,
}

impl BatchPredictor {
    /// Create a predictor over a loaded classifier, deriving the feature
    /// schema from the model's training columns
    pub fn new(classifier: Arc<dyn Classifier>) -> Result<Self> {
        let schema = classifier.feature_schema()?;
        Ok(Self {
            classifier,
            schema,
            config: PredictorConfig::default(),
        })
    }

    /// Replace the output rendering configuration
    #[must_use]
    pub fn with_config(mut self, config: PredictorConfig) -> Self {
        self.config = config;
        self
    }

    /// The feature schema this predictor validates against
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Validate, project, and classify every row of the uploaded table.
    ///
    /// On success the original rows come back untouched, with the
    /// prediction (and status) columns appended. On any failure no partial
    /// result is produced.
    pub fn predict(&self, batch: &RecordBatch) -> Result<BatchPrediction> {
        debug!(
            "Predicting over {} rows x {} columns",
            batch.num_rows(),
            batch.num_columns()
        );

        let features = self.schema.project(batch)?;
        let matrix = FeatureMatrix::from_batch(&features)?;
        let labels = self.classifier.predict(&matrix)?;

        if labels.len() != batch.num_rows() {
            return Err(PredictorError::Prediction(format!(
                "classifier returned {} labels for {} rows",
                labels.len(),
                batch.num_rows()
            )));
        }
        if let Some(bad) = labels.iter().find(|&&label| label != 0 && label != 1) {
            return Err(PredictorError::Prediction(format!(
                "classifier returned label {bad}, expected 0 or 1"
            )));
        }

        let table = self.append_predictions(batch, &labels)?;
        let summary = DailySummary::from_labels(&labels);
        info!("Batch prediction complete: {summary}");

        Ok(BatchPrediction {
            table,
            labels,
            summary,
        })
    }

    /// Append the prediction column, and the status column when configured
    fn append_predictions(&self, batch: &RecordBatch, labels: &[i64]) -> Result<RecordBatch> {
        let mut fields: Vec<Field> = batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.as_ref().clone())
            .collect();
        let mut arrays: Vec<ArrayRef> = batch.columns().to_vec();

        fields.push(Field::new(
            &self.config.prediction_column,
            DataType::Int64,
            false,
        ));
        arrays.push(Arc::new(Int64Array::from(labels.to_vec())));

        if self.config.attach_status {
            let status: Vec<&str> = labels
                .iter()
                .map(|&label| {
                    if label == 1 {
                        self.config.present_label.as_str()
                    } else {
                        self.config.absent_label.as_str()
                    }
                })
                .collect();
            fields.push(Field::new(&self.config.status_column, DataType::Utf8, false));
            arrays.push(Arc::new(StringArray::from(status)));
        }

        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).map_err(Into::into)
    }
}

/// Result of one batch prediction
#[derive(Debug, Clone)]
pub struct BatchPrediction {
    /// The original rows with the prediction column(s) appended
    pub table: RecordBatch,
    /// One 0/1 label per input row
    pub labels: Vec<i64>,
    /// Attendance counters derived from the labels
    pub summary: DailySummary,
}

impl BatchPrediction {
    /// Check the day's predicted attendance against a configured capacity
    pub fn capacity(&self, max_capacity: u32) -> Result<CapacityState> {
        CapacityState::new(max_capacity, self.summary.predicted_present as u64)
    }
}
