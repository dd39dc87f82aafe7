//! Error types for aggregation, metrics, and table I/O
//!
//! Every failure here signals a precondition violation by the caller or a
//! defect in the input data. Nothing is retried and nothing is silently
//! skipped: aggregation is pure and has no transient failure modes.

use thiserror::Error;

/// Errors produced by the aggregation pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// A slice set handed to the aggregator spans more than one subject/session
    #[error("predictions span more than one subject: expected {expected}, found {found}")]
    InvalidGrouping {
        /// Subject of the first slice in the set
        expected: String,
        /// Subject of the offending slice
        found: String,
    },

    /// A voting configuration violates its contract
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation was requested over an empty prediction set
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// A probability vector violates the basic invariants
    #[error("invalid probability vector for {subject}: {reason}")]
    InvalidProbabilities {
        /// Subject the offending slice belongs to
        subject: String,
        /// What went wrong with the vector
        reason: String,
    },

    /// A raw label value is missing from the label code
    #[error("label '{0}' is not in the label code")]
    UnknownLabel(String),

    /// A label code fails validation (empty, gap in indices, ambiguous entry)
    #[error("invalid label code: {0}")]
    InvalidLabelCode(String),

    /// One subject appears with two incompatible ground-truth labels
    #[error("conflicting ground-truth labels for {subject}: '{first}' and '{second}'")]
    ConflictingLabel {
        /// Subject carrying the conflict
        subject: String,
        /// First label observed
        first: String,
        /// Incompatible label observed later
        second: String,
    },

    /// A subject to be scored has no ground-truth label
    #[error("no ground-truth label for {0}")]
    MissingGroundTruth(String),

    /// Predicted and ground-truth label sequences differ in length
    #[error("predictions and ground truth differ in length: {predicted} vs {truth}")]
    MismatchedLengths {
        /// Number of predicted labels
        predicted: usize,
        /// Number of ground-truth labels
        truth: usize,
    },

    /// A class index falls outside the label code's range
    #[error("class index {index} out of range for {n_classes} classes")]
    ClassOutOfRange {
        /// The offending index
        index: usize,
        /// Number of classes in the label code
        n_classes: usize,
    },

    /// A structural defect in an input table
    #[error("malformed table {path} (line {line}): {reason}")]
    MalformedTable {
        /// Path of the offending file
        path: String,
        /// 1-based line number, 0 when the defect is not tied to a line
        line: u64,
        /// What is wrong with the table
        reason: String,
    },

    /// An underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for aggregation operations
pub type Result<T> = std::result::Result<T, Error>;
