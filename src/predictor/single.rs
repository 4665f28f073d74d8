//! Single-patient prediction with an optional booking verdict.

use crate::capacity::{CapacityState, CapacityVerdict};
use crate::encoder::PatientForm;
use crate::error::{PredictorError, Result};
use crate::model::{Classifier, PredictionResult};
use crate::schema::FeatureSchema;
use log::debug;
use std::sync::Arc;

/// Classifies one patient from their form entries.
///
/// Shares the same classifier handle as the batch path.
pub struct SinglePredictor {
    classifier: Arc<dyn Classifier>,
    schema: FeatureSchema,
}

impl SinglePredictor {
    /// Create a predictor over a loaded classifier
    pub fn new(classifier: Arc<dyn Classifier>) -> Result<Self> {
        let schema = classifier.feature_schema()?;
        Ok(Self { classifier, schema })
    }

    /// Encode the form and classify the resulting one-row matrix
    pub fn predict(&self, form: &PatientForm) -> Result<PredictionResult> {
        let matrix = form.encode_matrix(&self.schema)?;
        debug!("Encoded patient form into {} features", matrix.num_columns());

        let labels = self.classifier.predict(&matrix)?;
        let probas = self.classifier.predict_proba(&matrix)?;
        let (label, proba) = match (labels.first(), probas.first()) {
            (Some(&label), Some(&proba)) => (label, proba),
            _ => {
                return Err(PredictorError::Prediction(
                    "classifier returned no result for the patient row".to_string(),
                ));
            }
        };

        if label != 0 && label != 1 {
            return Err(PredictorError::Prediction(format!(
                "classifier returned label {label}, expected 0 or 1"
            )));
        }
        let probability_present = proba[1];
        if !(0.0..=1.0).contains(&probability_present) {
            return Err(PredictorError::Prediction(format!(
                "classifier returned probability {probability_present} outside [0, 1]"
            )));
        }

        Ok(PredictionResult {
            label,
            probability_present,
        })
    }

    /// Classify the patient and, when the batch path already produced a
    /// capacity state, annotate whether a booking could be made.
    ///
    /// With no capacity state the annotation is omitted; no default
    /// capacity is assumed.
    pub fn predict_with_capacity(
        &self,
        form: &PatientForm,
        capacity: Option<&CapacityState>,
    ) -> Result<SinglePrediction> {
        let result = self.predict(form)?;
        let booking = capacity.map(CapacityState::verdict);
        Ok(SinglePrediction { result, booking })
    }
}

/// A single patient's prediction, with the booking verdict when the day's
/// capacity is known
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinglePrediction {
    pub result: PredictionResult,
    pub booking: Option<CapacityVerdict>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{Gender, Weekday};
    use crate::model::{FeatureMatrix, LogisticModel};
    use crate::schema::FeatureSchema;

    fn standard_model(weights: Vec<f64>, intercept: f64) -> Arc<dyn Classifier> {
        let names = FeatureSchema::standard().columns().to_vec();
        Arc::new(LogisticModel::new(names, weights, intercept, 0.5).unwrap())
    }

    fn form() -> PatientForm {
        PatientForm {
            age: 30,
            gender: Gender::Female,
            scholarship: false,
            hypertension: false,
            diabetes: false,
            alcoholism: false,
            handicap: 0,
            sms_received: true,
            waiting_days: 3,
            weekday: Weekday::Samedi,
        }
    }

    #[test]
    fn test_predicts_label_and_probability() {
        // All-zero weights with a positive intercept: always "present",
        // probability sigmoid(2) ~= 0.88
        let predictor = SinglePredictor::new(standard_model(vec![0.0; 14], 2.0)).unwrap();
        let result = predictor.predict(&form()).unwrap();

        assert_eq!(result.label, 1);
        assert!(result.will_show());
        assert!(result.probability_present > 0.85);
        assert!((result.probability_present + result.probability_absent() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_intercept_predicts_no_show() {
        let predictor = SinglePredictor::new(standard_model(vec![0.0; 14], -2.0)).unwrap();
        let result = predictor.predict(&form()).unwrap();
        assert_eq!(result.label, 0);
        assert!(result.probability_present < 0.5);
    }

    #[test]
    fn test_booking_verdict_uses_batch_capacity() {
        let predictor = SinglePredictor::new(standard_model(vec![0.0; 14], 2.0)).unwrap();

        let full = CapacityState::new(20, 20).unwrap();
        let prediction = predictor
            .predict_with_capacity(&form(), Some(&full))
            .unwrap();
        assert_eq!(prediction.booking, Some(CapacityVerdict::Full));

        let open = CapacityState::new(20, 15).unwrap();
        let prediction = predictor
            .predict_with_capacity(&form(), Some(&open))
            .unwrap();
        assert_eq!(prediction.booking, Some(CapacityVerdict::Available(5)));
    }

    #[test]
    fn test_no_batch_means_no_booking_annotation() {
        let predictor = SinglePredictor::new(standard_model(vec![0.0; 14], 0.5)).unwrap();
        let prediction = predictor.predict_with_capacity(&form(), None).unwrap();
        assert!(prediction.booking.is_none());
    }

    #[test]
    fn test_invalid_form_is_rejected_before_encoding() {
        let predictor = SinglePredictor::new(standard_model(vec![0.0; 14], 0.5)).unwrap();
        let mut bad = form();
        bad.waiting_days = 400;
        assert!(matches!(
            predictor.predict(&bad),
            Err(PredictorError::InvalidInput(_))
        ));
    }

    /// Classifier that yields no rows, to pin the empty-result failure path
    struct SilentClassifier {
        features: Vec<String>,
    }

    impl Classifier for SilentClassifier {
        fn feature_names(&self) -> &[String] {
            &self.features
        }

        fn predict(&self, _features: &FeatureMatrix) -> Result<Vec<i64>> {
            Ok(Vec::new())
        }

        fn predict_proba(&self, _features: &FeatureMatrix) -> Result<Vec<[f64; 2]>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_empty_classifier_output_is_a_prediction_failure() {
        let silent = SilentClassifier {
            features: FeatureSchema::standard().columns().to_vec(),
        };
        let predictor = SinglePredictor::new(Arc::new(silent)).unwrap();
        assert!(matches!(
            predictor.predict(&form()),
            Err(PredictorError::Prediction(_))
        ));
    }
}
