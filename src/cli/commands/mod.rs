//! CLI command implementations

mod aggregate;
mod evaluate;
mod inspect;

use crate::cli::LogLevel;
use crate::config::{Cli, Command, VotingArgs};
use crate::label::LabelCode;
use crate::report::PredictionTable;
use std::path::Path;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Aggregate(args) => aggregate::run_aggregate(args, log_level),
        Command::Evaluate(args) => evaluate::run_evaluate(args, log_level),
        Command::Inspect(args) => inspect::run_inspect(args, log_level),
    }
}

/// Load the slice-prediction table behind a command
fn load_table(path: &Path) -> Result<PredictionTable, String> {
    crate::report::read_slice_predictions(path)
        .map_err(|e| format!("Failed to read predictions: {e}"))
}

/// Resolve the label code: explicit JSON file, or inferred from the table
fn resolve_label_code(args: &VotingArgs, table: &PredictionTable) -> Result<LabelCode, String> {
    let code = match &args.label_code {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read label code: {e}"))?;
            serde_json::from_str(&json).map_err(|e| format!("Invalid label code: {e}"))?
        }
        None => table
            .infer_label_code()
            .map_err(|e| format!("Failed to infer label code: {e}"))?,
    };
    if code.class_count() != table.n_classes {
        return Err(format!(
            "Label code has {} classes but the table has {} proba_* columns",
            code.class_count(),
            table.n_classes
        ));
    }
    Ok(code)
}
