//! Prediction records shared by the whole crate
//!
//! Slice predictions are the immutable inputs of aggregation; subject
//! aggregates are its outputs. Both carry plain probability vectors, so they
//! stay decoupled from how the external framework stores them on disk.

mod position;
mod record;

pub use position::{SliceAxis, SlicePosition};
pub use record::{
    argmax, validate_probabilities, SlicePrediction, SubjectAggregate, PROBABILITY_TOLERANCE,
};
