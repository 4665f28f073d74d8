//! Configuration for prediction output rendering.

/// Configuration for the batch predictor's output columns
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    /// Name of the appended 0/1 prediction column
    pub prediction_column: String,
    /// Name of the appended human-readable status column
    pub status_column: String,
    /// Whether to append the status column at all
    pub attach_status: bool,
    /// Label shown for a predicted attendance
    pub present_label: String,
    /// Label shown for a predicted no-show
    pub absent_label: String,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            prediction_column: "Prediction".to_string(),
            status_column: "Statut".to_string(),
            attach_status: true,
            present_label: "Présent".to_string(),
            absent_label: "Absent".to_string(),
        }
    }
}
