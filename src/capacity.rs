//! Daily capacity accounting.
//!
//! Compares the doctor's configured maximum daily patient count against the
//! number of patients the model predicts will attend. Advisory display
//! only; a full schedule never blocks any other operation.

use crate::error::{PredictorError, Result};
use std::fmt;

/// Smallest configurable daily capacity
pub const MIN_CAPACITY: u32 = 1;
/// Largest configurable daily capacity
pub const MAX_CAPACITY: u32 = 100;

/// The day's capacity position after a batch prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityState {
    max_capacity: u32,
    predicted_present: u64,
}

impl CapacityState {
    /// Create a capacity state.
    ///
    /// `max_capacity` is operator-configured and must lie in
    /// `MIN_CAPACITY..=MAX_CAPACITY`.
    pub fn new(max_capacity: u32, predicted_present: u64) -> Result<Self> {
        if !(MIN_CAPACITY..=MAX_CAPACITY).contains(&max_capacity) {
            return Err(PredictorError::InvalidInput(format!(
                "max capacity {max_capacity} is outside {MIN_CAPACITY}..={MAX_CAPACITY}"
            )));
        }
        Ok(Self {
            max_capacity,
            predicted_present,
        })
    }

    #[must_use]
    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    #[must_use]
    pub fn predicted_present(&self) -> u64 {
        self.predicted_present
    }

    /// Remaining bookable slots; negative when over capacity
    #[must_use]
    pub fn free_slots(&self) -> i64 {
        i64::from(self.max_capacity) - self.predicted_present as i64
    }

    /// Whether the schedule is full (no slot may be reported as available)
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free_slots() <= 0
    }

    /// The display verdict: exact free count when positive, full otherwise
    #[must_use]
    pub fn verdict(&self) -> CapacityVerdict {
        match self.free_slots() {
            n if n > 0 => CapacityVerdict::Available(n as u64),
            _ => CapacityVerdict::Full,
        }
    }
}

/// Display-ready capacity outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityVerdict {
    /// This many slots remain today
    Available(u64),
    /// The schedule is full; a negative balance is never shown as available
    Full,
}

impl fmt::Display for CapacityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(n) => write!(f, "{n} place(s) left today"),
            Self::Full => write!(f, "the schedule is full today"),
        }
    }
}
