//! # Votar
//!
//! Subject-level aggregation of slice-level classifier outputs for 2D-slice
//! neuroimaging workflows, with classification metrics at both the slice and
//! the subject/image level.
//!
//! An external deep-learning framework scores every 2D slice of a subject's
//! 3D volume with one probability vector per slice. Votar folds those
//! per-slice outputs into one diagnostic decision per (participant, session):
//! the `single` policy averages the vectors of one shared network, the
//! `multi` policy soft-votes across per-position specialized networks with a
//! tunable selection threshold and a mean-policy fallback, so a decision is
//! always produced.
//!
//! ## Quick start
//!
//! ```
//! use votar::prediction::{SliceAxis, SlicePosition, SlicePrediction};
//! use votar::voting::{aggregate, SelectionMode, VotingConfig};
//!
//! let predictions = vec![
//!     SlicePrediction::new(
//!         "sub-01",
//!         "ses-M000",
//!         SlicePosition::new(SliceAxis::Axial, 0),
//!         vec![0.9, 0.1],
//!     ),
//!     SlicePrediction::new(
//!         "sub-01",
//!         "ses-M000",
//!         SlicePosition::new(SliceAxis::Axial, 1),
//!         vec![0.3, 0.7],
//!     ),
//! ];
//!
//! let config = VotingConfig::new(SelectionMode::Single);
//! let decision = aggregate(&predictions, &config)?;
//! assert_eq!(decision.predicted_class, 0);
//! # Ok::<(), votar::Error>(())
//! ```
//!
//! Aggregation is pure and deterministic: slice predictions are expensive to
//! produce and are reused across threshold sweeps, so identical inputs must
//! reproduce identical decisions and metrics.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod label;
pub mod metrics;
pub mod prediction;
pub mod report;
pub mod voting;

// Re-export main types
pub use error::{Error, Result};
pub use label::LabelCode;
pub use metrics::{GroundTruth, MetricSet};
pub use prediction::{SlicePrediction, SubjectAggregate};
pub use voting::{aggregate, aggregate_all, SelectionMode, VoteWeighting, VotingConfig};
