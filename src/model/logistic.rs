//! Logistic regression classifier deserialized from a JSON artifact.

use super::{Classifier, FeatureMatrix};
use crate::error::{PredictorError, Result};
use serde::{Deserialize, Serialize};

fn default_threshold() -> f64 {
    0.5
}

/// A binary logistic regression model: one weight per feature column, an
/// intercept, and a decision threshold on the attendance probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    feature_names: Vec<String>,
    weights: Vec<f64>,
    intercept: f64,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

impl LogisticModel {
    /// Create a model, checking weight/feature consistency
    pub fn new(
        feature_names: Vec<String>,
        weights: Vec<f64>,
        intercept: f64,
        threshold: f64,
    ) -> Result<Self> {
        let model = Self {
            feature_names,
            weights,
            intercept,
            threshold,
        };
        model.check_consistency()?;
        Ok(model)
    }

    /// Verify the artifact is internally consistent.
    ///
    /// Called after deserialization; a model that fails here must not be
    /// used for inference.
    pub fn check_consistency(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(PredictorError::ModelLoad(
                "model has no feature columns".to_string(),
            ));
        }
        if self.weights.len() != self.feature_names.len() {
            return Err(PredictorError::ModelLoad(format!(
                "model has {} weights for {} feature columns",
                self.weights.len(),
                self.feature_names.len()
            )));
        }
        if !self.weights.iter().chain([&self.intercept]).all(|w| w.is_finite()) {
            return Err(PredictorError::ModelLoad(
                "model weights contain non-finite values".to_string(),
            ));
        }
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(PredictorError::ModelLoad(format!(
                "decision threshold {} is outside (0, 1)",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Probability of attendance for one feature row
    fn score(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.weights.len() {
            return Err(PredictorError::Prediction(format!(
                "feature row has {} values, model expects {}",
                row.len(),
                self.weights.len()
            )));
        }
        for value in row {
            if !value.is_finite() {
                return Err(PredictorError::Prediction(
                    "feature row contains non-finite values".to_string(),
                ));
            }
        }
        let z: f64 = self
            .weights
            .iter()
            .zip(row)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        Ok(sigmoid(z))
    }

    /// Confirm the matrix columns line up with the training columns
    fn check_alignment(&self, features: &FeatureMatrix) -> Result<()> {
        if features.columns() != self.feature_names.as_slice() {
            return Err(PredictorError::Prediction(
                "feature columns do not match the model's training columns".to_string(),
            ));
        }
        Ok(())
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<i64>> {
        self.check_alignment(features)?;
        features
            .rows()
            .iter()
            .map(|row| {
                let p = self.score(row)?;
                Ok(i64::from(p >= self.threshold))
            })
            .collect()
    }

    fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<[f64; 2]>> {
        self.check_alignment(features)?;
        features
            .rows()
            .iter()
            .map(|row| {
                let p = self.score(row)?;
                Ok([1.0 - p, p])
            })
            .collect()
    }
}
