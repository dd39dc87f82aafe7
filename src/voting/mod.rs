//! The slice aggregator: subject-level decisions from slice-level outputs
//!
//! One trained network scores every 2D slice of a subject's volume
//! independently; this module folds those per-slice probability vectors into
//! a single diagnostic decision per (participant, session). Two policies:
//!
//! - `single`: one shared network was trained on slices from all positions,
//!   so the outputs are exchangeable samples and the aggregate is their
//!   elementwise mean;
//! - `multi`: one specialized network per slice position, so each slice casts
//!   a vote for its arg-max class. The leading class wins outright when its
//!   vote fraction clears the selection threshold; otherwise the mean policy
//!   decides, so a decision is always produced.
//!
//! Aggregation is a pure function of its inputs. Slice predictions are
//! expensive to produce and are reused across threshold sweeps, so repeated
//! calls on identical inputs must be bit-identical.

mod config;

pub use config::{SelectionMode, VoteWeighting, VotingConfig};

use crate::error::{Error, Result};
use crate::prediction::{argmax, SlicePrediction, SubjectAggregate};
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Aggregate the slice predictions of one subject/session into one decision
///
/// All predictions must belong to the same (participant, session) pair; a
/// mixed set fails with [`Error::InvalidGrouping`]. The set must be non-empty
/// and every probability vector must satisfy the basic invariants.
pub fn aggregate(
    predictions: &[SlicePrediction],
    config: &VotingConfig,
) -> Result<SubjectAggregate> {
    config.validate()?;
    let refs: Vec<&SlicePrediction> = predictions.iter().collect();
    aggregate_group(&refs, config)
}

/// Aggregate an arbitrary prediction table, one decision per subject/session
///
/// Predictions are grouped by (participant, session) and each group is
/// reduced independently. Output is sorted by (participant, session), so a
/// re-ordered input table produces an identical result. With the `parallel`
/// feature the groups are reduced on a rayon pool; subjects have disjoint
/// inputs and outputs, so the semantics are identical to the serial path.
pub fn aggregate_all(
    predictions: &[SlicePrediction],
    config: &VotingConfig,
) -> Result<Vec<SubjectAggregate>> {
    config.validate()?;
    if predictions.is_empty() {
        return Err(Error::EmptyInput("slice prediction table".to_string()));
    }

    // BTreeMap keeps subjects in (participant, session) order
    let mut groups: BTreeMap<(&str, &str), Vec<&SlicePrediction>> = BTreeMap::new();
    for prediction in predictions {
        groups
            .entry((&prediction.participant_id, &prediction.session_id))
            .or_default()
            .push(prediction);
    }
    let groups: Vec<Vec<&SlicePrediction>> = groups.into_values().collect();

    #[cfg(feature = "parallel")]
    {
        groups
            .par_iter()
            .map(|group| aggregate_group(group, config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        groups
            .iter()
            .map(|group| aggregate_group(group, config))
            .collect()
    }
}

/// Reduce one validated group of slice predictions
///
/// Callers have already validated the configuration; this checks the
/// prediction-set preconditions and applies the selected policy.
fn aggregate_group(
    slices: &[&SlicePrediction],
    config: &VotingConfig,
) -> Result<SubjectAggregate> {
    let first = slices.first().ok_or_else(|| {
        Error::EmptyInput("slice prediction set for one subject".to_string())
    })?;
    for slice in &slices[1..] {
        if !slice.same_subject(first) {
            return Err(Error::InvalidGrouping {
                expected: first.subject_label(),
                found: slice.subject_label(),
            });
        }
    }

    let n_classes = first.probabilities.len();
    for slice in slices {
        slice.validate(n_classes)?;
    }

    let (probabilities, predicted_class) = match config.mode {
        SelectionMode::Single => mean_policy(slices, n_classes),
        SelectionMode::Multi => vote_policy(slices, n_classes, config),
    };

    Ok(SubjectAggregate {
        participant_id: first.participant_id.clone(),
        session_id: first.session_id.clone(),
        probabilities,
        predicted_class,
    })
}

/// Elementwise mean of the probability vectors, arg-max decision
fn mean_policy(slices: &[&SlicePrediction], n_classes: usize) -> (Vec<f64>, usize) {
    let mut mean = vec![0.0; n_classes];
    for slice in slices {
        for (accumulated, &p) in mean.iter_mut().zip(&slice.probabilities) {
            *accumulated += p;
        }
    }
    for accumulated in &mut mean {
        *accumulated /= slices.len() as f64;
    }
    let class = argmax(&mean);
    (mean, class)
}

/// Soft-voting: per-class vote fractions, threshold, mean-policy fallback
fn vote_policy(
    slices: &[&SlicePrediction],
    n_classes: usize,
    config: &VotingConfig,
) -> (Vec<f64>, usize) {
    let mut votes = vec![0.0; n_classes];
    let mut total = 0.0;
    for slice in slices {
        let voted = slice.predicted_class();
        let weight = match config.weighting {
            VoteWeighting::Uniform => 1.0,
            VoteWeighting::Confidence => slice.probabilities[voted],
        };
        votes[voted] += weight;
        total += weight;
    }
    for vote in &mut votes {
        *vote /= total;
    }
    let leading = argmax(&votes);
    if votes[leading] >= config.threshold {
        (votes, leading)
    } else {
        mean_policy(slices, n_classes)
    }
}
