//! Slice position metadata

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Anatomical axis along which a 2D slice was extracted from a 3D volume
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SliceAxis {
    /// Left-right axis
    #[serde(rename = "sag")]
    Sagittal,
    /// Front-back axis
    #[serde(rename = "cor")]
    Coronal,
    /// Top-bottom axis
    #[serde(rename = "axi")]
    Axial,
}

impl SliceAxis {
    /// Short name as used in extracted-tensor file names
    pub fn short_name(&self) -> &'static str {
        match self {
            SliceAxis::Sagittal => "sag",
            SliceAxis::Coronal => "cor",
            SliceAxis::Axial => "axi",
        }
    }
}

impl FromStr for SliceAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sag" | "sagittal" => Ok(SliceAxis::Sagittal),
            "cor" | "coronal" => Ok(SliceAxis::Coronal),
            "axi" | "axial" => Ok(SliceAxis::Axial),
            _ => Err(format!(
                "Unknown slice axis: {s}. Valid axes: sag, cor, axi"
            )),
        }
    }
}

impl fmt::Display for SliceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Position of a 2D slice: anatomical axis plus index along it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlicePosition {
    /// Axis the slice was extracted along
    pub axis: SliceAxis,
    /// 0-based index along the axis
    pub index: usize,
}

impl SlicePosition {
    /// Create a slice position
    pub fn new(axis: SliceAxis, index: usize) -> Self {
        Self { axis, index }
    }
}

impl fmt::Display for SlicePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.axis, self.index)
    }
}
