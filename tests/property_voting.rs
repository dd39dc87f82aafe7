//! Property tests for the slice aggregator and metrics
//!
//! Ensures the aggregation protocol satisfies its mathematical invariants:
//! - Determinism: identical inputs produce bit-identical decisions
//! - Permutation invariance of the mean policy
//! - Aggregate vectors stay valid probability vectors
//! - Metrics bounded to [0, 1], never NaN
//! - Subject-level sample count never exceeds slice-level

use proptest::collection::vec;
use proptest::prelude::*;
use votar::metrics::{slice_level, subject_level, GroundTruth};
use votar::prediction::{argmax, SliceAxis, SlicePosition, SlicePrediction};
use votar::voting::{aggregate, aggregate_all, SelectionMode, VoteWeighting, VotingConfig};
use votar::LabelCode;

// =============================================================================
// Strategy Helpers
// =============================================================================

/// Generate one normalized probability vector over `n_classes` classes
fn probability_vector(n_classes: usize) -> impl Strategy<Value = Vec<f64>> {
    vec(0.001..1.0f64, n_classes).prop_map(|raw| {
        let total: f64 = raw.iter().sum();
        raw.into_iter().map(|x| x / total).collect()
    })
}

/// Generate the slice predictions of one subject
fn subject_slices(
    n_classes: usize,
    len: std::ops::Range<usize>,
) -> impl Strategy<Value = Vec<SlicePrediction>> {
    vec(probability_vector(n_classes), len).prop_map(|vectors| {
        vectors
            .into_iter()
            .enumerate()
            .map(|(index, probabilities)| {
                SlicePrediction::new(
                    "sub-01",
                    "ses-M000",
                    SlicePosition::new(SliceAxis::Axial, index),
                    probabilities,
                )
            })
            .collect()
    })
}

/// Generate a multi-subject table: subject index, then that subject's slices
fn prediction_table(
    n_classes: usize,
    n_subjects: usize,
) -> impl Strategy<Value = Vec<SlicePrediction>> {
    vec((0..n_subjects, probability_vector(n_classes)), 1..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(row, (subject, probabilities))| {
                SlicePrediction::new(
                    format!("sub-{subject:02}"),
                    "ses-M000",
                    SlicePosition::new(SliceAxis::Axial, row),
                    probabilities,
                )
            })
            .collect()
    })
}

fn any_config() -> impl Strategy<Value = VotingConfig> {
    (
        prop_oneof![Just(SelectionMode::Single), Just(SelectionMode::Multi)],
        0.0..=1.0f64,
        prop_oneof![Just(VoteWeighting::Uniform), Just(VoteWeighting::Confidence)],
    )
        .prop_map(|(mode, threshold, weighting)| {
            VotingConfig::new(mode)
                .with_threshold(threshold)
                .with_weighting(weighting)
        })
}

/// Ground truth assigning every generated subject a class from its index
fn truth_for(predictions: &[SlicePrediction], n_classes: usize) -> (GroundTruth, LabelCode) {
    let code = LabelCode::from_pairs(
        (0..n_classes).map(|c| (format!("class-{c}"), c)),
    )
    .unwrap();
    let rows: Vec<(String, String, String)> = predictions
        .iter()
        .map(|p| {
            let class = p.participant_id.trim_start_matches("sub-").parse::<usize>().unwrap()
                % n_classes;
            (
                p.participant_id.clone(),
                p.session_id.clone(),
                format!("class-{class}"),
            )
        })
        .collect();
    let truth = GroundTruth::from_rows(
        rows.iter().map(|(p, s, l)| (p.as_str(), s.as_str(), l.as_str())),
        &code,
    )
    .unwrap();
    (truth, code)
}

// =============================================================================
// Aggregation Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_aggregate_deterministic(
        predictions in subject_slices(3, 1..20),
        config in any_config()
    ) {
        let a = aggregate(&predictions, &config).unwrap();
        let b = aggregate(&predictions, &config).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_single_policy_permutation_invariant(
        predictions in subject_slices(3, 2..20),
        seed in any::<u64>()
    ) {
        let config = VotingConfig::new(SelectionMode::Single);
        let baseline = aggregate(&predictions, &config).unwrap();

        let mut shuffled = predictions;
        // Deterministic Fisher-Yates driven by the seed
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }
        let permuted = aggregate(&shuffled, &config).unwrap();

        prop_assert_eq!(baseline.predicted_class, permuted.predicted_class);
        for (a, b) in baseline.probabilities.iter().zip(&permuted.probabilities) {
            prop_assert!((a - b).abs() < 1e-9, "mean changed under permutation: {a} vs {b}");
        }
    }

    #[test]
    fn prop_single_policy_is_elementwise_mean(
        predictions in subject_slices(4, 1..20)
    ) {
        let config = VotingConfig::new(SelectionMode::Single);
        let result = aggregate(&predictions, &config).unwrap();
        for (class, &value) in result.probabilities.iter().enumerate() {
            let mean: f64 = predictions.iter().map(|p| p.probabilities[class]).sum::<f64>()
                / predictions.len() as f64;
            prop_assert!((value - mean).abs() < 1e-12);
        }
    }

    #[test]
    fn prop_aggregate_vector_is_a_distribution(
        predictions in subject_slices(3, 1..20),
        config in any_config()
    ) {
        let result = aggregate(&predictions, &config).unwrap();
        prop_assert_eq!(result.probabilities.len(), 3);
        let sum: f64 = result.probabilities.iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9, "aggregate sums to {sum}");
        for &p in &result.probabilities {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&p));
        }
    }

    #[test]
    fn prop_predicted_class_is_argmax_of_vector(
        predictions in subject_slices(3, 1..20),
        config in any_config()
    ) {
        let result = aggregate(&predictions, &config).unwrap();
        prop_assert_eq!(result.predicted_class, argmax(&result.probabilities));
    }

    #[test]
    fn prop_multi_threshold_zero_never_falls_back(
        predictions in subject_slices(3, 1..20)
    ) {
        // With threshold 0 the leading vote fraction always clears the bar,
        // so the aggregate must carry vote fractions: every entry is a
        // multiple of 1/n under uniform weighting.
        let config = VotingConfig::new(SelectionMode::Multi).with_threshold(0.0);
        let result = aggregate(&predictions, &config).unwrap();
        let n = predictions.len() as f64;
        for &p in &result.probabilities {
            let scaled = p * n;
            prop_assert!(
                (scaled - scaled.round()).abs() < 1e-9,
                "{p} is not a count fraction over {n} slices"
            );
        }
    }

    #[test]
    fn prop_multi_threshold_one_usually_falls_back(
        predictions in subject_slices(3, 2..20)
    ) {
        // At threshold 1 the vote only wins on unanimity; otherwise the
        // decision must equal the mean policy's.
        let multi = VotingConfig::new(SelectionMode::Multi).with_threshold(1.0);
        let single = VotingConfig::new(SelectionMode::Single);
        let voted = aggregate(&predictions, &multi).unwrap();
        let unanimous = predictions
            .iter()
            .map(SlicePrediction::predicted_class)
            .all(|c| c == predictions[0].predicted_class());
        if !unanimous {
            let mean = aggregate(&predictions, &single).unwrap();
            prop_assert_eq!(voted.predicted_class, mean.predicted_class);
        }
    }

    #[test]
    fn prop_aggregate_all_covers_every_subject(
        predictions in prediction_table(2, 5),
        config in any_config()
    ) {
        let results = aggregate_all(&predictions, &config).unwrap();
        let mut subjects: Vec<&str> =
            predictions.iter().map(|p| p.participant_id.as_str()).collect();
        subjects.sort_unstable();
        subjects.dedup();
        prop_assert_eq!(results.len(), subjects.len());
        // Output sorted by (participant, session)
        for pair in results.windows(2) {
            prop_assert!(
                (&pair[0].participant_id, &pair[0].session_id)
                    < (&pair[1].participant_id, &pair[1].session_id)
            );
        }
    }
}

// =============================================================================
// Metric Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_metrics_bounded_and_finite(
        predictions in prediction_table(2, 4),
        config in any_config()
    ) {
        let (truth, _code) = truth_for(&predictions, 2);
        let aggregates = aggregate_all(&predictions, &config).unwrap();
        let slices = slice_level(&predictions, &truth, 2).unwrap();
        let subjects = subject_level(&aggregates, &truth, 2).unwrap();
        for metrics in [&slices, &subjects] {
            for value in [
                metrics.accuracy,
                metrics.balanced_accuracy,
                metrics.sensitivity,
                metrics.specificity,
                metrics.ppv,
                metrics.npv,
            ] {
                prop_assert!((0.0..=1.0).contains(&value), "{value} not in [0, 1]");
                prop_assert!(!value.is_nan() && !value.is_infinite());
            }
        }
    }

    #[test]
    fn prop_subject_count_never_exceeds_slice_count(
        predictions in prediction_table(2, 4),
        config in any_config()
    ) {
        let (truth, _code) = truth_for(&predictions, 2);
        let aggregates = aggregate_all(&predictions, &config).unwrap();
        let slices = slice_level(&predictions, &truth, 2).unwrap();
        let subjects = subject_level(&aggregates, &truth, 2).unwrap();
        prop_assert!(subjects.n_samples <= slices.n_samples);
        prop_assert_eq!(slices.n_samples, predictions.len());
        prop_assert_eq!(subjects.n_samples, aggregates.len());
    }

    #[test]
    fn prop_metrics_deterministic_across_runs(
        predictions in prediction_table(2, 4),
        config in any_config()
    ) {
        let (truth, _code) = truth_for(&predictions, 2);
        let a = subject_level(&aggregate_all(&predictions, &config).unwrap(), &truth, 2).unwrap();
        let b = subject_level(&aggregate_all(&predictions, &config).unwrap(), &truth, 2).unwrap();
        prop_assert_eq!(a, b);
    }
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn threshold_just_above_one_rejected() {
    let predictions = vec![SlicePrediction::new(
        "sub-01",
        "ses-M000",
        SlicePosition::new(SliceAxis::Axial, 0),
        vec![0.5, 0.5],
    )];
    let config = VotingConfig::new(SelectionMode::Multi).with_threshold(1.0001);
    assert!(matches!(
        aggregate(&predictions, &config),
        Err(votar::Error::InvalidConfig(_))
    ));
}

#[test]
fn tie_resolves_to_lowest_class_index() {
    let predictions = vec![SlicePrediction::new(
        "sub-01",
        "ses-M000",
        SlicePosition::new(SliceAxis::Axial, 0),
        vec![0.5, 0.5],
    )];
    let result = aggregate(&predictions, &VotingConfig::default()).unwrap();
    assert_eq!(result.predicted_class, 0);
}

#[test]
fn worked_single_policy_scenario() {
    let predictions = vec![
        SlicePrediction::new(
            "sub-S1",
            "ses-M000",
            SlicePosition::new(SliceAxis::Axial, 0),
            vec![0.9, 0.1],
        ),
        SlicePrediction::new(
            "sub-S1",
            "ses-M000",
            SlicePosition::new(SliceAxis::Axial, 1),
            vec![0.8, 0.2],
        ),
        SlicePrediction::new(
            "sub-S1",
            "ses-M000",
            SlicePosition::new(SliceAxis::Axial, 2),
            vec![0.3, 0.7],
        ),
    ];
    let result = aggregate(&predictions, &VotingConfig::default()).unwrap();
    assert!((result.probabilities[0] - 2.0 / 3.0).abs() < 1e-9);
    assert!((result.probabilities[1] - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(result.predicted_class, 0);

    // Same predictions under multi with threshold 0.6: votes {0, 0, 1},
    // leading fraction 2/3 >= 0.6, class 0 selected directly
    let config = VotingConfig::new(SelectionMode::Multi).with_threshold(0.6);
    let voted = aggregate(&predictions, &config).unwrap();
    assert_eq!(voted.predicted_class, 0);
    assert!((voted.probabilities[0] - 2.0 / 3.0).abs() < 1e-9);
}
