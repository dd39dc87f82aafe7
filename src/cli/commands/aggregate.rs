//! Aggregate command implementation

use super::{load_table, resolve_label_code};
use crate::cli::LogLevel;
use crate::config::AggregateArgs;
use crate::metrics::{slice_level, subject_level};
use crate::report::{write_metrics, write_subject_predictions};
use crate::voting::aggregate_all;

/// Aggregate a slice-prediction table into subject-level decisions
pub fn run_aggregate(args: AggregateArgs, level: LogLevel) -> Result<(), String> {
    let table = load_table(&args.predictions)?;
    let code = resolve_label_code(&args.voting, &table)?;
    let config = args.voting.voting_config();
    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {e}"))?;

    level.log(LogLevel::Normal,
        &format!(
            "Aggregating {} slice predictions (mode={}, threshold={}, weighting={})",
            table.predictions.len(),
            config.mode,
            config.threshold,
            config.weighting
        ),
    );

    let aggregates = aggregate_all(&table.predictions, &config)
        .map_err(|e| format!("Aggregation failed: {e}"))?;
    let truth = table
        .ground_truth(&code)
        .map_err(|e| format!("Invalid ground-truth labels: {e}"))?;

    std::fs::create_dir_all(&args.output_dir)
        .map_err(|e| format!("Failed to create output directory: {e}"))?;

    let predictions_path = args
        .output_dir
        .join(format!("{}_image_level_prediction.tsv", args.prefix));
    write_subject_predictions(&predictions_path, &aggregates, &truth, &code)
        .map_err(|e| format!("Failed to write predictions: {e}"))?;
    level.log(LogLevel::Normal,
        &format!(
            "Wrote {} subject decisions to {}",
            aggregates.len(),
            predictions_path.display()
        ),
    );

    if args.metrics {
        let slices = slice_level(&table.predictions, &truth, table.n_classes)
            .map_err(|e| format!("Slice-level metrics failed: {e}"))?;
        let subjects = subject_level(&aggregates, &truth, table.n_classes)
            .map_err(|e| format!("Image-level metrics failed: {e}"))?;
        for (name, metrics) in [("slice", &slices), ("image", &subjects)] {
            let path = args
                .output_dir
                .join(format!("{}_{name}_level_metrics.tsv", args.prefix));
            write_metrics(&path, &[(name, metrics)])
                .map_err(|e| format!("Failed to write metrics: {e}"))?;
            level.log(LogLevel::Verbose,
                &format!(
                    "{name} level: accuracy {:.4}, balanced accuracy {:.4} ({} samples)",
                    metrics.accuracy, metrics.balanced_accuracy, metrics.n_samples
                ),
            );
            level.log(LogLevel::Normal,
                &format!("Wrote {name}-level metrics to {}", path.display()),
            );
        }
    }

    Ok(())
}
