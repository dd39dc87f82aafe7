//! Evaluate command implementation

use super::{load_table, resolve_label_code};
use crate::cli::LogLevel;
use crate::config::{EvaluateArgs, OutputFormat};
use crate::metrics::{slice_level, subject_level};
use crate::report::{write_metrics, Report};
use crate::voting::aggregate_all;

/// Compute slice-level and image-level metrics for a prediction table
pub fn run_evaluate(args: EvaluateArgs, level: LogLevel) -> Result<(), String> {
    let table = load_table(&args.predictions)?;
    let code = resolve_label_code(&args.voting, &table)?;
    let config = args.voting.voting_config();
    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {e}"))?;

    let aggregates = aggregate_all(&table.predictions, &config)
        .map_err(|e| format!("Aggregation failed: {e}"))?;
    let truth = table
        .ground_truth(&code)
        .map_err(|e| format!("Invalid ground-truth labels: {e}"))?;

    let slices = slice_level(&table.predictions, &truth, table.n_classes)
        .map_err(|e| format!("Slice-level metrics failed: {e}"))?;
    let subjects = subject_level(&aggregates, &truth, table.n_classes)
        .map_err(|e| format!("Image-level metrics failed: {e}"))?;

    if let Some(output_dir) = &args.output_dir {
        std::fs::create_dir_all(output_dir)
            .map_err(|e| format!("Failed to create output directory: {e}"))?;
        let path = output_dir.join("votar_metrics.tsv");
        write_metrics(&path, &[("slice", &slices), ("image", &subjects)])
            .map_err(|e| format!("Failed to write metrics: {e}"))?;
        level.log(LogLevel::Normal,
            &format!("Wrote metric table to {}", path.display()),
        );
    }

    let report = Report::new(&config, table.n_classes, slices, subjects);
    let rendered = match args.format {
        OutputFormat::Text => report.to_text(),
        OutputFormat::Json => report
            .to_json()
            .map_err(|e| format!("Failed to render report: {e}"))?,
    };
    level.log(LogLevel::Normal, &rendered);

    Ok(())
}
