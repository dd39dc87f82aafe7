//! The standard metric set reported at each evaluation level

use super::confusion::ConfusionMatrix;
use serde::Serialize;

/// Classification metrics for one evaluation level
///
/// For binary codes the positive class is index 1 (the `{CN: 0, AD: 1}`
/// convention): sensitivity is the recall of class 1 and specificity the
/// recall of class 0. With more than two classes the four rate metrics are
/// macro averages of their per-class one-vs-rest values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricSet {
    /// Fraction of correctly classified samples
    pub accuracy: f64,
    /// Mean of per-class recall
    pub balanced_accuracy: f64,
    /// Recall of the positive class
    pub sensitivity: f64,
    /// Recall of the negative class
    pub specificity: f64,
    /// Positive predictive value
    pub ppv: f64,
    /// Negative predictive value
    pub npv: f64,
    /// Number of samples scored
    pub n_samples: usize,
}

impl MetricSet {
    /// Compute the metric set from a confusion matrix
    pub fn from_confusion(cm: &ConfusionMatrix) -> Self {
        let n_classes = cm.n_classes();
        let balanced_accuracy =
            (0..n_classes).map(|c| cm.recall(c)).sum::<f64>() / n_classes as f64;

        let (sensitivity, specificity, ppv, npv) = if n_classes == 2 {
            (
                cm.recall(1),
                cm.recall(0),
                cm.precision(1),
                cm.negative_predictive_value(1),
            )
        } else {
            (
                macro_average(cm, ConfusionMatrix::recall),
                macro_average(cm, ConfusionMatrix::specificity),
                macro_average(cm, ConfusionMatrix::precision),
                macro_average(cm, ConfusionMatrix::negative_predictive_value),
            )
        };

        Self {
            accuracy: cm.accuracy(),
            balanced_accuracy,
            sensitivity,
            specificity,
            ppv,
            npv,
            n_samples: cm.total(),
        }
    }
}

fn macro_average(cm: &ConfusionMatrix, metric: fn(&ConfusionMatrix, usize) -> f64) -> f64 {
    let n_classes = cm.n_classes();
    (0..n_classes).map(|c| metric(cm, c)).sum::<f64>() / n_classes as f64
}
