//! Classification metrics at the slice and subject/image levels
//!
//! Both levels score the same underlying slice-prediction set with no
//! re-inference: the slice level treats every slice as one sample against
//! its subject's ground-truth label, the subject level treats every
//! aggregate as one sample. Subject-level sample count is therefore never
//! larger than slice-level, with equality only when each subject contributed
//! exactly one slice.

mod confusion;
mod set;
mod truth;

pub use confusion::ConfusionMatrix;
pub use set::MetricSet;
pub use truth::GroundTruth;

use crate::error::Result;
use crate::prediction::{SlicePrediction, SubjectAggregate};

/// Score every slice prediction as an independent sample
pub fn slice_level(
    predictions: &[SlicePrediction],
    truth: &GroundTruth,
    n_classes: usize,
) -> Result<MetricSet> {
    let mut y_pred = Vec::with_capacity(predictions.len());
    let mut y_true = Vec::with_capacity(predictions.len());
    for prediction in predictions {
        prediction.validate(n_classes)?;
        y_pred.push(prediction.predicted_class());
        y_true.push(truth.class_of(&prediction.participant_id, &prediction.session_id)?);
    }
    let cm = ConfusionMatrix::from_labels(&y_pred, &y_true, n_classes)?;
    Ok(MetricSet::from_confusion(&cm))
}

/// Score every subject aggregate as one sample
pub fn subject_level(
    aggregates: &[SubjectAggregate],
    truth: &GroundTruth,
    n_classes: usize,
) -> Result<MetricSet> {
    let mut y_pred = Vec::with_capacity(aggregates.len());
    let mut y_true = Vec::with_capacity(aggregates.len());
    for aggregate in aggregates {
        y_pred.push(aggregate.predicted_class);
        y_true.push(truth.class_of(&aggregate.participant_id, &aggregate.session_id)?);
    }
    let cm = ConfusionMatrix::from_labels(&y_pred, &y_true, n_classes)?;
    Ok(MetricSet::from_confusion(&cm))
}
