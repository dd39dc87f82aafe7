//! Votar CLI
//!
//! Subject-level aggregation of slice-level classifier outputs.
//!
//! # Usage
//!
//! ```bash
//! # Aggregate a slice-prediction table into subject decisions
//! votar aggregate predictions.tsv --mode multi --threshold 0.6
//!
//! # Compute slice-level and image-level metrics
//! votar evaluate predictions.tsv --format json
//!
//! # Summarize a prediction table
//! votar inspect predictions.tsv
//! ```

use clap::Parser;
use std::process::ExitCode;
use votar::cli::{run_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
