//! Serialization of predictions, decisions, and metrics
//!
//! The aggregation core stays decoupled from file formats; this module is
//! the caller that reads the framework's slice-prediction tables and writes
//! the subject-level tables and metric reports back out.

mod run;
mod tables;

pub use run::Report;
pub use tables::{
    read_slice_predictions, write_metrics, write_subject_predictions, PredictionTable,
};
