//! Daily attendance summary aggregation.

use std::fmt;

/// Counters over one day's predicted labels.
///
/// `total == predicted_present + predicted_absent` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailySummary {
    pub total: usize,
    pub predicted_present: usize,
    pub predicted_absent: usize,
}

impl DailySummary {
    /// Fold a label column (1 = present, anything else = absent) into
    /// counters. Empty input yields the all-zero summary.
    #[must_use]
    pub fn from_labels(labels: &[i64]) -> Self {
        let total = labels.len();
        let predicted_present = labels.iter().filter(|&&label| label == 1).count();
        Self {
            total,
            predicted_present,
            predicted_absent: total - predicted_present,
        }
    }
}

impl fmt::Display for DailySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} appointments: {} expected, {} predicted absent",
            self.total, self.predicted_present, self.predicted_absent
        )
    }
}
