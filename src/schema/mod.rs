//! Feature schema registry and batch validation.
//!
//! A [`FeatureSchema`] is the ordered list of column names the trained
//! classifier was fitted on. It is fixed for a given model version: every
//! row handed to the classifier must carry exactly these columns, in this
//! order, as numeric values (boolean-like fields as 0/1).

use crate::error::{PredictorError, Result};
use arrow::array::{Array, ArrayRef};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::collections::HashSet;
use std::sync::Arc;

/// Canonical feature column names shared by the schema and the form encoder.
pub mod columns {
    pub const GENDER: &str = "Gender";
    pub const SCHOLARSHIP: &str = "Scholarship";
    pub const HYPERTENSION: &str = "Hypertension";
    pub const DIABETES: &str = "Diabetes";
    pub const ALCOHOLISM: &str = "Alcoholism";
    pub const HANDICAP: &str = "Handicap";
    pub const SMS_RECEIVED: &str = "SMS_received";
    pub const WAITING_DAYS: &str = "WaitingDays";
    pub const APPOINTMENT_WEEKDAY: &str = "AppointmentWeekday";
    pub const IS_WEEKEND: &str = "IsWeekend";
    pub const AGE_13_19: &str = "Age group_13-19";
    pub const AGE_20_39: &str = "Age group_20-39";
    pub const AGE_40_59: &str = "Age group_40-59";
    pub const AGE_60_PLUS: &str = "Age group_60+";
}

/// The ordered set of feature columns a deployed model expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema from an ordered list of column names.
    ///
    /// Rejects empty schemas and duplicate column names.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(PredictorError::InvalidInput(
                "feature schema must contain at least one column".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(PredictorError::InvalidInput(format!(
                    "duplicate feature column: {name}"
                )));
            }
        }
        Ok(Self { columns })
    }

    /// The schema layout of the currently deployed attendance model
    #[must_use]
    pub fn standard() -> Self {
        Self {
            columns: vec![
                columns::GENDER.to_string(),
                columns::SCHOLARSHIP.to_string(),
                columns::HYPERTENSION.to_string(),
                columns::DIABETES.to_string(),
                columns::ALCOHOLISM.to_string(),
                columns::HANDICAP.to_string(),
                columns::SMS_RECEIVED.to_string(),
                columns::WAITING_DAYS.to_string(),
                columns::APPOINTMENT_WEEKDAY.to_string(),
                columns::IS_WEEKEND.to_string(),
                columns::AGE_13_19.to_string(),
                columns::AGE_20_39.to_string(),
                columns::AGE_40_59.to_string(),
                columns::AGE_60_PLUS.to_string(),
            ],
        }
    }

    /// Column names in schema order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of feature columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Schema columns absent from the given batch, in schema order
    #[must_use]
    pub fn missing_from(&self, batch: &RecordBatch) -> Vec<String> {
        self.columns
            .iter()
            .filter(|name| batch.column_by_name(name).is_none())
            .cloned()
            .collect()
    }

    /// Validate a batch against the schema and project it onto the schema
    /// columns, in schema order, cast to `Float64`.
    ///
    /// Fails with [`PredictorError::SchemaMismatch`] listing the exact
    /// missing columns when any required column is absent. Extra columns in
    /// the input are ignored here; the caller keeps the original batch for
    /// display. Columns that cannot be represented as numbers fail with
    /// [`PredictorError::Prediction`].
    pub fn project(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let missing = self.missing_from(batch);
        if !missing.is_empty() {
            return Err(PredictorError::SchemaMismatch { missing });
        }

        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let column =
                batch
                    .column_by_name(name)
                    .ok_or_else(|| PredictorError::SchemaMismatch {
                        missing: vec![name.clone()],
                    })?;
            let column = cast(column, &DataType::Float64)?;
            if column.null_count() > 0 {
                return Err(PredictorError::Prediction(format!(
                    "column '{name}' contains missing or non-numeric values"
                )));
            }
            arrays.push(column);
        }

        RecordBatch::try_new(self.to_arrow(), arrays).map_err(Into::into)
    }

    /// Arrow schema of the projected feature matrix (all `Float64`)
    #[must_use]
    pub fn to_arrow(&self) -> SchemaRef {
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|name| Field::new(name, DataType::Float64, false))
            .collect();
        Arc::new(Schema::new(fields))
    }
}
