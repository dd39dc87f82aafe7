//! Slice-level and subject-level prediction records

use super::position::SlicePosition;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tolerance when checking that a probability vector sums to 1
///
/// Vectors come from float32 softmax outputs round-tripped through text
/// tables, so a tight tolerance would reject legitimate data.
pub const PROBABILITY_TOLERANCE: f64 = 1e-4;

/// Output of one forward pass of a trained network on one 2D slice
///
/// Immutable once produced; expensive to recompute (requires inference), so
/// the same set is reused across aggregation configurations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlicePrediction {
    /// Participant identifier, e.g. `sub-OASIS10016`
    pub participant_id: String,
    /// Session identifier, e.g. `ses-M000`
    pub session_id: String,
    /// Where the slice sits in the volume
    pub position: SlicePosition,
    /// Probability per class, summing to 1
    pub probabilities: Vec<f64>,
}

impl SlicePrediction {
    /// Create a slice prediction
    pub fn new(
        participant_id: impl Into<String>,
        session_id: impl Into<String>,
        position: SlicePosition,
        probabilities: Vec<f64>,
    ) -> Self {
        Self {
            participant_id: participant_id.into(),
            session_id: session_id.into(),
            position,
            probabilities,
        }
    }

    /// `participant/session` label used in error messages and reports
    pub fn subject_label(&self) -> String {
        format!("{}/{}", self.participant_id, self.session_id)
    }

    /// Whether two predictions belong to the same subject/session
    pub fn same_subject(&self, other: &SlicePrediction) -> bool {
        self.participant_id == other.participant_id && self.session_id == other.session_id
    }

    /// Check the probability-vector invariants against a class count
    pub fn validate(&self, n_classes: usize) -> Result<()> {
        validate_probabilities(&self.probabilities, n_classes).map_err(|reason| {
            Error::InvalidProbabilities {
                subject: format!("{} ({})", self.subject_label(), self.position),
                reason,
            }
        })
    }

    /// Class this slice votes for: arg-max with ties broken by lowest index
    pub fn predicted_class(&self) -> usize {
        argmax(&self.probabilities)
    }
}

/// Subject-level decision produced by the aggregator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubjectAggregate {
    /// Participant identifier
    pub participant_id: String,
    /// Session identifier
    pub session_id: String,
    /// Final probability vector (mean policy) or vote-fraction vector
    pub probabilities: Vec<f64>,
    /// Selected class index
    pub predicted_class: usize,
}

impl SubjectAggregate {
    /// `participant/session` label used in error messages and reports
    pub fn subject_label(&self) -> String {
        format!("{}/{}", self.participant_id, self.session_id)
    }
}

/// Index of the largest value, ties broken by lowest index
///
/// Deterministic for any input: a later value replaces the current best only
/// when strictly greater. Returns 0 for an empty slice; callers validate
/// non-emptiness beforehand.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = index;
        }
    }
    best
}

/// Check a probability vector against the basic invariants
///
/// The vector must have exactly `n_classes` finite, non-negative entries
/// summing to 1 within [`PROBABILITY_TOLERANCE`]. Returns the violation as a
/// plain string; callers attach subject context.
pub fn validate_probabilities(
    probabilities: &[f64],
    n_classes: usize,
) -> std::result::Result<(), String> {
    if probabilities.len() != n_classes {
        return Err(format!(
            "expected {n_classes} entries, found {}",
            probabilities.len()
        ));
    }
    for (index, &p) in probabilities.iter().enumerate() {
        if !p.is_finite() {
            return Err(format!("entry {index} is not finite"));
        }
        if p < 0.0 {
            return Err(format!("entry {index} is negative ({p})"));
        }
    }
    let sum: f64 = probabilities.iter().sum();
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(format!("entries sum to {sum}, expected 1"));
    }
    Ok(())
}
