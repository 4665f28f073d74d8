//! Single-patient form encoding into the model's feature layout.
//!
//! The form fields are categorical or bounded integers; encoding turns them
//! into the numeric 0/1 layout the classifier was trained on. Range limits
//! are part of the form contract and are checked before any value reaches
//! the feature row.

use crate::error::{PredictorError, Result};
use crate::model::FeatureMatrix;
use crate::schema::{FeatureSchema, columns};
use std::fmt;
use std::str::FromStr;

/// Inclusive upper bound on patient age
pub const MAX_AGE: u32 = 120;
/// Inclusive upper bound on the handicap level
pub const MAX_HANDICAP: u32 = 4;
/// Inclusive upper bound on waiting days between booking and appointment
pub const MAX_WAITING_DAYS: u32 = 365;

/// Patient gender as captured on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Numeric encoding used at training time: male = 1, female = 0
    #[must_use]
    pub fn encode(self) -> f64 {
        match self {
            Self::Male => 1.0,
            Self::Female => 0.0,
        }
    }
}

impl FromStr for Gender {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "homme" => Ok(Self::Male),
            "f" | "femme" => Ok(Self::Female),
            other => Err(PredictorError::InvalidInput(format!(
                "unknown gender '{other}' (expected M or F)"
            ))),
        }
    }
}

/// Appointment weekday, using the French day names the form offers.
///
/// The ordering is fixed: Lundi = 0 through Dimanche = 6, which makes
/// Samedi/Dimanche the weekend pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Lundi,
    Mardi,
    Mercredi,
    Jeudi,
    Vendredi,
    Samedi,
    Dimanche,
}

impl Weekday {
    /// All seven days, in index order
    pub const ALL: [Self; 7] = [
        Self::Lundi,
        Self::Mardi,
        Self::Mercredi,
        Self::Jeudi,
        Self::Vendredi,
        Self::Samedi,
        Self::Dimanche,
    ];

    /// Index in the fixed week ordering, 0..=6
    #[must_use]
    pub fn index(self) -> u32 {
        match self {
            Self::Lundi => 0,
            Self::Mardi => 1,
            Self::Mercredi => 2,
            Self::Jeudi => 3,
            Self::Vendredi => 4,
            Self::Samedi => 5,
            Self::Dimanche => 6,
        }
    }

    /// Whether the day falls on the weekend (index 5 or 6)
    #[must_use]
    pub fn is_weekend(self) -> bool {
        self.index() >= 5
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lundi => "Lundi",
            Self::Mardi => "Mardi",
            Self::Mercredi => "Mercredi",
            Self::Jeudi => "Jeudi",
            Self::Vendredi => "Vendredi",
            Self::Samedi => "Samedi",
            Self::Dimanche => "Dimanche",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|day| day.name().to_lowercase() == lower)
            .copied()
            .ok_or_else(|| {
                PredictorError::InvalidInput(format!("unknown weekday '{s}'"))
            })
    }
}

/// One patient's form entries, prior to encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientForm {
    pub age: u32,
    pub gender: Gender,
    /// Receives social aid (Bolsa Família style scholarship flag)
    pub scholarship: bool,
    pub hypertension: bool,
    pub diabetes: bool,
    pub alcoholism: bool,
    /// Handicap level, 0..=4
    pub handicap: u32,
    /// Whether an SMS reminder was received
    pub sms_received: bool,
    /// Days between booking and the appointment, 0..=365
    pub waiting_days: u32,
    pub weekday: Weekday,
}

impl PatientForm {
    /// Enforce the form's inclusive range limits.
    ///
    /// Must pass before the form is encoded; the encoder itself has no
    /// error conditions beyond these.
    pub fn validate(&self) -> Result<()> {
        if self.age > MAX_AGE {
            return Err(PredictorError::InvalidInput(format!(
                "age {} is outside 0..={MAX_AGE}",
                self.age
            )));
        }
        if self.handicap > MAX_HANDICAP {
            return Err(PredictorError::InvalidInput(format!(
                "handicap level {} is outside 0..={MAX_HANDICAP}",
                self.handicap
            )));
        }
        if self.waiting_days > MAX_WAITING_DAYS {
            return Err(PredictorError::InvalidInput(format!(
                "waiting days {} is outside 0..={MAX_WAITING_DAYS}",
                self.waiting_days
            )));
        }
        Ok(())
    }

    /// Encode the form as one feature row in schema order.
    ///
    /// Deterministic: the same form always produces the same row.
    pub fn encode(&self, schema: &FeatureSchema) -> Result<Vec<f64>> {
        self.validate()?;

        let buckets = age_buckets(self.age);
        let value_of = |name: &str| -> Result<f64> {
            let value = match name {
                columns::GENDER => self.gender.encode(),
                columns::SCHOLARSHIP => flag(self.scholarship),
                columns::HYPERTENSION => flag(self.hypertension),
                columns::DIABETES => flag(self.diabetes),
                columns::ALCOHOLISM => flag(self.alcoholism),
                columns::HANDICAP => f64::from(self.handicap),
                columns::SMS_RECEIVED => flag(self.sms_received),
                columns::WAITING_DAYS => f64::from(self.waiting_days),
                columns::APPOINTMENT_WEEKDAY => f64::from(self.weekday.index()),
                columns::IS_WEEKEND => flag(self.weekday.is_weekend()),
                columns::AGE_13_19 => buckets[0],
                columns::AGE_20_39 => buckets[1],
                columns::AGE_40_59 => buckets[2],
                columns::AGE_60_PLUS => buckets[3],
                other => {
                    return Err(PredictorError::InvalidInput(format!(
                        "the patient form cannot produce feature column '{other}'"
                    )));
                }
            };
            Ok(value)
        };

        schema.columns().iter().map(|name| value_of(name)).collect()
    }

    /// Encode the form as a one-row feature matrix for the classifier
    pub fn encode_matrix(&self, schema: &FeatureSchema) -> Result<FeatureMatrix> {
        let row = self.encode(schema)?;
        FeatureMatrix::new(schema.columns().to_vec(), vec![row])
    }
}

/// Yes/no form answers encode as 1/0
fn flag(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

/// Mutually exclusive one-hot flags for the age bands
/// [13-19], [20-39], [40-59], [60+].
///
/// Ages below 13 set no flag at all; the training encoding treats them as
/// the baseline category rather than giving them a bucket of their own.
fn age_buckets(age: u32) -> [f64; 4] {
    match age {
        13..=19 => [1.0, 0.0, 0.0, 0.0],
        20..=39 => [0.0, 1.0, 0.0, 0.0],
        40..=59 => [0.0, 0.0, 1.0, 0.0],
        60.. => [0.0, 0.0, 0.0, 1.0],
        _ => [0.0, 0.0, 0.0, 0.0],
    }
}
