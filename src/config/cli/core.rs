//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::voting::{SelectionMode, VoteWeighting, VotingConfig};

/// Votar: subject-level aggregation of slice-level classifier outputs
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "votar")]
#[command(version)]
#[command(
    about = "Soft-voting aggregation and classification metrics for 2D-slice neuroimaging workflows"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Aggregate slice predictions into subject-level decisions
    Aggregate(AggregateArgs),

    /// Compute slice-level and image-level classification metrics
    Evaluate(EvaluateArgs),

    /// Summarize a slice-prediction table
    Inspect(InspectArgs),
}

/// Options shared by the aggregate and evaluate commands
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct VotingArgs {
    /// Aggregation policy (single, multi)
    #[arg(short, long, default_value = "single")]
    pub mode: SelectionMode,

    /// Minimum vote fraction the leading class must reach in multi mode
    #[arg(short, long, default_value_t = 0.0)]
    pub threshold: f64,

    /// Vote weighting scheme for multi mode (uniform, confidence)
    #[arg(short, long, default_value = "uniform")]
    pub weighting: VoteWeighting,

    /// JSON file mapping raw labels to class indices; inferred when omitted
    #[arg(short, long)]
    pub label_code: Option<PathBuf>,
}

impl VotingArgs {
    /// Voting configuration requested on the command line
    pub fn voting_config(&self) -> VotingConfig {
        VotingConfig::new(self.mode)
            .with_threshold(self.threshold)
            .with_weighting(self.weighting)
    }
}

/// Arguments for the aggregate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AggregateArgs {
    /// Slice-prediction table (TSV)
    #[arg(value_name = "PREDICTIONS")]
    pub predictions: PathBuf,

    /// Voting policy options
    #[command(flatten)]
    pub voting: VotingArgs,

    /// Directory for the output tables
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Prefix of the output file names
    #[arg(short, long, default_value = "votar")]
    pub prefix: String,

    /// Also write the slice-level and image-level metric tables
    #[arg(long)]
    pub metrics: bool,
}

/// Arguments for the evaluate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct EvaluateArgs {
    /// Slice-prediction table (TSV)
    #[arg(value_name = "PREDICTIONS")]
    pub predictions: PathBuf,

    /// Voting policy options
    #[command(flatten)]
    pub voting: VotingArgs,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Also write the metric table into this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the inspect command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InspectArgs {
    /// Slice-prediction table (TSV)
    #[arg(value_name = "PREDICTIONS")]
    pub predictions: PathBuf,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
