//! Inspect command implementation

use super::load_table;
use crate::cli::LogLevel;
use crate::config::InspectArgs;
use std::collections::BTreeMap;

/// Summarize a slice-prediction table without aggregating it
pub fn run_inspect(args: InspectArgs, level: LogLevel) -> Result<(), String> {
    let table = load_table(&args.predictions)?;

    let mut slices_per_subject: BTreeMap<(String, String), usize> = BTreeMap::new();
    for prediction in &table.predictions {
        *slices_per_subject
            .entry((
                prediction.participant_id.clone(),
                prediction.session_id.clone(),
            ))
            .or_default() += 1;
    }
    let mut label_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in &table.labels {
        *label_counts.entry(label.as_str()).or_default() += 1;
    }

    level.log(LogLevel::Normal, "Prediction table:");
    level.log(LogLevel::Normal,
        &format!("  Slices: {}", table.predictions.len()),
    );
    level.log(LogLevel::Normal,
        &format!("  Subjects: {}", slices_per_subject.len()),
    );
    level.log(LogLevel::Normal,
        &format!("  Classes: {}", table.n_classes),
    );
    if let (Some(min), Some(max)) = (
        slices_per_subject.values().min(),
        slices_per_subject.values().max(),
    ) {
        level.log(LogLevel::Normal,
            &format!("  Slices per subject: {min}..{max}"),
        );
    }
    level.log(LogLevel::Normal, "  Label distribution:");
    for (label, count) in &label_counts {
        level.log(LogLevel::Normal,
            &format!("    {label}: {count} rows"),
        );
    }

    if level == LogLevel::Verbose {
        level.log(LogLevel::Verbose, "\nSubjects:");
        for ((participant, session), count) in &slices_per_subject {
            level.log(LogLevel::Verbose,
                &format!("  {participant}/{session}: {count} slices"),
            );
        }
    }

    Ok(())
}
