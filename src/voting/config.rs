//! Voting configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the slice-level networks were trained, and so how their outputs
/// combine into one subject-level decision
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// One shared network evaluated across all slice positions; per-slice
    /// outputs are exchangeable samples and the aggregate is their mean
    Single,
    /// One specialized network per slice position; each slice casts a vote
    /// and the leading class must clear the selection threshold
    Multi,
}

impl SelectionMode {
    /// Name as used on the command line and in reports
    pub fn name(&self) -> &'static str {
        match self {
            SelectionMode::Single => "single",
            SelectionMode::Multi => "multi",
        }
    }
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(SelectionMode::Single),
            "multi" => Ok(SelectionMode::Multi),
            _ => Err(format!("Unknown selection mode: {s}. Valid modes: single, multi")),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How much each slice's vote counts in multi-CNN soft-voting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteWeighting {
    /// Every slice casts one vote; vote fractions are plain count fractions
    #[default]
    Uniform,
    /// Each slice's vote is weighted by its own top probability
    Confidence,
}

impl VoteWeighting {
    /// Name as used on the command line and in reports
    pub fn name(&self) -> &'static str {
        match self {
            VoteWeighting::Uniform => "uniform",
            VoteWeighting::Confidence => "confidence",
        }
    }
}

impl FromStr for VoteWeighting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uniform" => Ok(VoteWeighting::Uniform),
            "confidence" => Ok(VoteWeighting::Confidence),
            _ => Err(format!(
                "Unknown vote weighting: {s}. Valid weightings: uniform, confidence"
            )),
        }
    }
}

impl fmt::Display for VoteWeighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Configuration for subject-level aggregation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VotingConfig {
    /// Aggregation policy
    pub mode: SelectionMode,
    /// Minimum vote fraction the leading class must reach in `multi` mode
    /// before it is selected directly; below it the mean policy decides.
    /// Must lie in `[0, 1]`.
    pub threshold: f64,
    /// Vote weighting scheme for `multi` mode
    pub weighting: VoteWeighting,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Single,
            threshold: 0.0,
            weighting: VoteWeighting::Uniform,
        }
    }
}

impl VotingConfig {
    /// Configuration for a mode with the default threshold and weighting
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the selection threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the vote weighting scheme
    pub fn with_weighting(mut self, weighting: VoteWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Check the configuration contract
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "selection threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VotingConfig::default();
        assert_eq!(config.mode, SelectionMode::Single);
        assert_eq!(config.threshold, 0.0);
        assert_eq!(config.weighting, VoteWeighting::Uniform);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = VotingConfig::new(SelectionMode::Multi)
            .with_threshold(0.6)
            .with_weighting(VoteWeighting::Confidence);
        assert_eq!(config.mode, SelectionMode::Multi);
        assert_eq!(config.threshold, 0.6);
        assert_eq!(config.weighting, VoteWeighting::Confidence);
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(VotingConfig::new(SelectionMode::Multi)
            .with_threshold(0.0)
            .validate()
            .is_ok());
        assert!(VotingConfig::new(SelectionMode::Multi)
            .with_threshold(1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_threshold_above_one_rejected() {
        let err = VotingConfig::new(SelectionMode::Multi)
            .with_threshold(1.0001)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_threshold_negative_rejected() {
        assert!(VotingConfig::new(SelectionMode::Multi)
            .with_threshold(-0.1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_threshold_nan_rejected() {
        assert!(VotingConfig::new(SelectionMode::Multi)
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("single".parse::<SelectionMode>().unwrap(), SelectionMode::Single);
        assert_eq!("MULTI".parse::<SelectionMode>().unwrap(), SelectionMode::Multi);
        assert!("ensemble".parse::<SelectionMode>().is_err());
    }

    #[test]
    fn test_weighting_from_str() {
        assert_eq!("uniform".parse::<VoteWeighting>().unwrap(), VoteWeighting::Uniform);
        assert_eq!(
            "confidence".parse::<VoteWeighting>().unwrap(),
            VoteWeighting::Confidence
        );
        assert!("softmax".parse::<VoteWeighting>().is_err());
    }
}
