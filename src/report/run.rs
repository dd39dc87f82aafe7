//! JSON run report bundling both metric levels with run metadata

use crate::error::Result;
use crate::metrics::MetricSet;
use crate::voting::VotingConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of one aggregation run
///
/// Plays the role of the run log the external framework keeps beside its
/// outputs: enough metadata to know which configuration produced which
/// numbers, without re-reading the tables.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    /// When the report was generated (UTC)
    pub generated_at: DateTime<Utc>,
    /// Aggregation policy
    pub mode: String,
    /// Selection threshold
    pub threshold: f64,
    /// Vote weighting scheme
    pub weighting: String,
    /// Number of classes in the label code
    pub n_classes: usize,
    /// Number of slice predictions consumed
    pub n_slices: usize,
    /// Number of subject/session pairs decided
    pub n_subjects: usize,
    /// Metrics with every slice as one sample
    pub slice_level: MetricSet,
    /// Metrics with every subject aggregate as one sample
    pub image_level: MetricSet,
}

impl Report {
    /// Build a report for one run
    pub fn new(
        config: &VotingConfig,
        n_classes: usize,
        slice_level: MetricSet,
        image_level: MetricSet,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            mode: config.mode.name().to_string(),
            threshold: config.threshold,
            weighting: config.weighting.name().to_string(),
            n_classes,
            n_slices: slice_level.n_samples,
            n_subjects: image_level.n_samples,
            slice_level,
            image_level,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e).into()
        })
    }

    /// Plain-text rendering for terminal output
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Aggregation: mode={} threshold={} weighting={}\n",
            self.mode, self.threshold, self.weighting
        ));
        out.push_str(&format!(
            "Samples: {} slices, {} subjects, {} classes\n\n",
            self.n_slices, self.n_subjects, self.n_classes
        ));
        out.push_str(&format!(
            "{:>20} {:>10} {:>10}\n",
            "", "slice", "image"
        ));
        for (name, slice, image) in [
            ("accuracy", self.slice_level.accuracy, self.image_level.accuracy),
            (
                "balanced_accuracy",
                self.slice_level.balanced_accuracy,
                self.image_level.balanced_accuracy,
            ),
            (
                "sensitivity",
                self.slice_level.sensitivity,
                self.image_level.sensitivity,
            ),
            (
                "specificity",
                self.slice_level.specificity,
                self.image_level.specificity,
            ),
            ("ppv", self.slice_level.ppv, self.image_level.ppv),
            ("npv", self.slice_level.npv, self.image_level.npv),
        ] {
            out.push_str(&format!("{name:>20} {slice:>10.4} {image:>10.4}\n"));
        }
        out
    }
}
