//! CLI parsing tests

use super::core::{parse_args, Command};
use crate::config::OutputFormat;
use crate::voting::{SelectionMode, VoteWeighting};

#[test]
fn test_parse_aggregate_defaults() {
    let cli = parse_args(["votar", "aggregate", "preds.tsv"]).unwrap();
    match cli.command {
        Command::Aggregate(args) => {
            assert_eq!(args.predictions.to_str(), Some("preds.tsv"));
            assert_eq!(args.voting.mode, SelectionMode::Single);
            assert_eq!(args.voting.threshold, 0.0);
            assert_eq!(args.voting.weighting, VoteWeighting::Uniform);
            assert!(args.voting.label_code.is_none());
            assert_eq!(args.output_dir.to_str(), Some("."));
            assert_eq!(args.prefix, "votar");
            assert!(!args.metrics);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_aggregate_multi_with_threshold() {
    let cli = parse_args([
        "votar",
        "aggregate",
        "preds.tsv",
        "--mode",
        "multi",
        "--threshold",
        "0.6",
        "--weighting",
        "confidence",
        "--metrics",
    ])
    .unwrap();
    match cli.command {
        Command::Aggregate(args) => {
            assert_eq!(args.voting.mode, SelectionMode::Multi);
            assert_eq!(args.voting.threshold, 0.6);
            assert_eq!(args.voting.weighting, VoteWeighting::Confidence);
            assert!(args.metrics);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_evaluate_json() {
    let cli = parse_args(["votar", "evaluate", "preds.tsv", "--format", "json"]).unwrap();
    match cli.command {
        Command::Evaluate(args) => {
            assert_eq!(args.format, OutputFormat::Json);
            assert!(args.output_dir.is_none());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_inspect() {
    let cli = parse_args(["votar", "inspect", "preds.tsv"]).unwrap();
    assert!(matches!(cli.command, Command::Inspect(_)));
}

#[test]
fn test_global_flags() {
    let cli = parse_args(["votar", "inspect", "preds.tsv", "--verbose"]).unwrap();
    assert!(cli.verbose);
    assert!(!cli.quiet);
    let cli = parse_args(["votar", "-q", "inspect", "preds.tsv"]).unwrap();
    assert!(cli.quiet);
}

#[test]
fn test_bad_mode_rejected() {
    assert!(parse_args(["votar", "aggregate", "preds.tsv", "--mode", "ensemble"]).is_err());
}

#[test]
fn test_bad_format_rejected() {
    assert!(parse_args(["votar", "evaluate", "preds.tsv", "--format", "yaml"]).is_err());
}

#[test]
fn test_missing_predictions_rejected() {
    assert!(parse_args(["votar", "aggregate"]).is_err());
}

#[test]
fn test_voting_config_from_args() {
    let cli = parse_args([
        "votar",
        "aggregate",
        "preds.tsv",
        "-m",
        "multi",
        "-t",
        "0.5",
    ])
    .unwrap();
    match cli.command {
        Command::Aggregate(args) => {
            let config = args.voting.voting_config();
            assert_eq!(config.mode, SelectionMode::Multi);
            assert_eq!(config.threshold, 0.5);
            assert!(config.validate().is_ok());
        }
        other => panic!("unexpected command: {other:?}"),
    }
}
