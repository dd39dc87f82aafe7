//! Soft-Voting Walkthrough
//!
//! Aggregates a toy cohort of slice predictions under both policies and
//! compares slice-level against image-level metrics.
//!
//! Run with: cargo run --example soft_voting

use votar::metrics::{slice_level, subject_level, GroundTruth};
use votar::prediction::{SliceAxis, SlicePosition, SlicePrediction};
use votar::voting::{aggregate_all, SelectionMode, VotingConfig};
use votar::LabelCode;

fn main() -> Result<(), votar::Error> {
    println!("=== Soft-Voting Walkthrough ===\n");

    // 1. Fix the label code before anything else
    let code = LabelCode::from_pairs(vec![
        ("CN".to_string(), 0),
        ("AD".to_string(), 1),
    ])?;
    println!("Label code: CN -> 0, AD -> 1\n");

    // 2. A toy cohort: three subjects, three axial slices each
    let predictions = cohort();
    let truth = GroundTruth::from_rows(
        vec![
            ("sub-01", "ses-M000", "CN"),
            ("sub-02", "ses-M000", "AD"),
            ("sub-03", "ses-M000", "AD"),
        ],
        &code,
    )?;
    println!("Cohort: {} slice predictions, 3 subjects", predictions.len());

    // 3. Single-CNN policy: one shared network, mean probabilities
    println!("\n--- Policy 1: single (mean probabilities) ---");
    let single = VotingConfig::new(SelectionMode::Single);
    let decisions = aggregate_all(&predictions, &single)?;
    for decision in &decisions {
        println!(
            "  {}: class {} ({:?})",
            decision.subject_label(),
            decision.predicted_class,
            decision
                .probabilities
                .iter()
                .map(|p| (p * 1000.0).round() / 1000.0)
                .collect::<Vec<_>>()
        );
    }

    // 4. Multi-CNN policy: per-slice votes with a selection threshold
    println!("\n--- Policy 2: multi (soft-voting, threshold 0.6) ---");
    let multi = VotingConfig::new(SelectionMode::Multi).with_threshold(0.6);
    let voted = aggregate_all(&predictions, &multi)?;
    for decision in &voted {
        println!(
            "  {}: class {} (vote fractions {:?})",
            decision.subject_label(),
            decision.predicted_class,
            decision
                .probabilities
                .iter()
                .map(|p| (p * 1000.0).round() / 1000.0)
                .collect::<Vec<_>>()
        );
    }

    // 5. Metrics: every slice as one sample vs every subject as one sample
    println!("\n--- Metrics (single policy) ---");
    let slices = slice_level(&predictions, &truth, code.class_count())?;
    let subjects = subject_level(&decisions, &truth, code.class_count())?;
    println!(
        "  slice level: accuracy {:.3}, balanced accuracy {:.3} ({} samples)",
        slices.accuracy, slices.balanced_accuracy, slices.n_samples
    );
    println!(
        "  image level: accuracy {:.3}, balanced accuracy {:.3} ({} samples)",
        subjects.accuracy, subjects.balanced_accuracy, subjects.n_samples
    );
    println!("\nAggregation absorbs dissenting slices: the image level can be");
    println!("more accurate than any individual slice position.");

    Ok(())
}

/// Three subjects with three axial slices each; sub-03 has one noisy slice
fn cohort() -> Vec<SlicePrediction> {
    let mut predictions = Vec::new();
    let subjects: [(&str, [[f64; 2]; 3]); 3] = [
        ("sub-01", [[0.9, 0.1], [0.8, 0.2], [0.7, 0.3]]),
        ("sub-02", [[0.2, 0.8], [0.1, 0.9], [0.3, 0.7]]),
        ("sub-03", [[0.4, 0.6], [0.6, 0.4], [0.2, 0.8]]),
    ];
    for (participant, vectors) in subjects {
        for (index, vector) in vectors.into_iter().enumerate() {
            predictions.push(SlicePrediction::new(
                participant,
                "ses-M000",
                SlicePosition::new(SliceAxis::Axial, index),
                vector.to_vec(),
            ));
        }
    }
    predictions
}
