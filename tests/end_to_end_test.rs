//! End-to-end batch and single-patient scenarios against a real model
//! artifact and a real CSV upload.

use noshow::{
    BatchPredictor, CapacityVerdict, FeatureSchema, Gender, LogisticModel, PatientForm,
    PredictorError, SinglePredictor, Weekday, load_classifier, read_appointments_csv,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// A deterministic attendance model over the standard schema: a strong
/// positive weight on SMS_received with a negative intercept, so a patient
/// is predicted present exactly when they received the reminder.
fn sms_model() -> LogisticModel {
    let names = FeatureSchema::standard().columns().to_vec();
    let weights: Vec<f64> = names
        .iter()
        .map(|name| if name == "SMS_received" { 10.0 } else { 0.0 })
        .collect();
    LogisticModel::new(names, weights, -5.0, 0.5).unwrap()
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("noshow-e2e-{}-{name}", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

/// CSV with every schema column plus a pass-through extra, three rows with
/// SMS_received = [1, 0, 1]
fn day_csv() -> String {
    let header = [
        "PatientId",
        "Gender",
        "Scholarship",
        "Hypertension",
        "Diabetes",
        "Alcoholism",
        "Handicap",
        "SMS_received",
        "WaitingDays",
        "AppointmentWeekday",
        "IsWeekend",
        "Age group_13-19",
        "Age group_20-39",
        "Age group_40-59",
        "Age group_60+",
    ]
    .join(",");
    format!(
        "{header}\n\
         p1,1,0,0,0,0,0,1,3,2,0,0,1,0,0\n\
         p2,0,0,1,0,0,0,0,10,5,1,0,0,1,0\n\
         p3,0,1,0,1,0,1,1,0,6,1,1,0,0,0\n"
    )
}

#[test]
fn test_batch_scenario_with_full_schedule() {
    let csv_path = temp_file("day.csv", &day_csv());
    let batch = read_appointments_csv(&csv_path).unwrap();
    std::fs::remove_file(&csv_path).ok();

    let predictor = BatchPredictor::new(Arc::new(sms_model())).unwrap();
    let result = predictor.predict(&batch).unwrap();

    // Model predicts [1, 0, 1] from the SMS column
    assert_eq!(result.labels, vec![1, 0, 1]);
    assert_eq!(result.table.num_rows(), 3);
    assert_eq!(result.summary.total, 3);
    assert_eq!(result.summary.predicted_present, 2);
    assert_eq!(result.summary.predicted_absent, 1);

    // The extra PatientId column rides along untouched
    assert!(result.table.column_by_name("PatientId").is_some());
    assert!(result.table.column_by_name("Prediction").is_some());

    // max_capacity 2 against 2 predicted present: zero free slots, full
    let capacity = result.capacity(2).unwrap();
    assert_eq!(capacity.free_slots(), 0);
    assert_eq!(capacity.verdict(), CapacityVerdict::Full);
}

#[test]
fn test_missing_columns_are_reported_and_block_prediction() {
    let csv_path = temp_file(
        "partial.csv",
        "PatientId,Gender,SMS_received\np1,1,1\np2,0,0\n",
    );
    let batch = read_appointments_csv(&csv_path).unwrap();
    std::fs::remove_file(&csv_path).ok();

    let predictor = BatchPredictor::new(Arc::new(sms_model())).unwrap();
    match predictor.predict(&batch) {
        Err(PredictorError::SchemaMismatch { missing }) => {
            // Exactly the absent schema columns, in schema order
            assert_eq!(
                missing,
                vec![
                    "Scholarship",
                    "Hypertension",
                    "Diabetes",
                    "Alcoholism",
                    "Handicap",
                    "WaitingDays",
                    "AppointmentWeekday",
                    "IsWeekend",
                    "Age group_13-19",
                    "Age group_20-39",
                    "Age group_40-59",
                    "Age group_60+",
                ]
            );
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn test_model_artifact_round_trip_and_single_patient() {
    let artifact = serde_json::to_string(&sms_model()).unwrap();
    let model_path = temp_file("model.json", &artifact);
    let classifier = load_classifier(&model_path).unwrap();
    std::fs::remove_file(&model_path).ok();

    let predictor = SinglePredictor::new(classifier).unwrap();
    let mut form = PatientForm {
        age: 34,
        gender: Gender::Female,
        scholarship: false,
        hypertension: false,
        diabetes: false,
        alcoholism: false,
        handicap: 0,
        sms_received: true,
        waiting_days: 7,
        weekday: Weekday::Jeudi,
    };

    // SMS received: z = 10 - 5 = 5, firmly "will show"
    let result = predictor.predict(&form).unwrap();
    assert_eq!(result.label, 1);
    assert!(result.probability_present > 0.95);

    // No SMS: z = -5, firmly "no-show"
    form.sms_received = false;
    let result = predictor.predict(&form).unwrap();
    assert_eq!(result.label, 0);
    assert!(result.probability_present < 0.05);
}

#[test]
fn test_corrupt_model_artifact_fails_to_load() {
    let model_path = temp_file("corrupt.json", "{ not json");
    let result = load_classifier(&model_path);
    std::fs::remove_file(&model_path).ok();
    assert!(matches!(result, Err(PredictorError::ModelLoad(_))));
}
