//! Label code: raw categorical labels to integer class indices
//!
//! A label code fixes the class set once, before any aggregation, and is
//! read-only afterwards. Several raw values may share one index (synonyms),
//! so a table using `"AD"` and `"Alzheimer"` interchangeably can map both to
//! the same class. The used indices must cover `0..C` without gaps.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from raw categorical label values to integer class indices
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, usize>", into = "BTreeMap<String, usize>")]
pub struct LabelCode {
    map: BTreeMap<String, usize>,
    n_classes: usize,
}

impl LabelCode {
    /// Build a label code from explicit `(raw value, class index)` pairs
    ///
    /// Distinct raw values may map to the same index. Fails with
    /// [`Error::InvalidLabelCode`] when the pairs are empty, when one raw
    /// value is mapped to two different indices, or when the index set has
    /// gaps.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, usize)>,
    {
        let mut map = BTreeMap::new();
        for (raw, index) in pairs {
            if let Some(&existing) = map.get(&raw) {
                if existing != index {
                    return Err(Error::InvalidLabelCode(format!(
                        "label '{raw}' mapped to both {existing} and {index}"
                    )));
                }
                continue;
            }
            map.insert(raw, index);
        }
        let n_classes = validate_indices(&map)?;
        Ok(Self { map, n_classes })
    }

    /// Infer a label code from observed raw labels
    ///
    /// Distinct values are sorted lexicographically and numbered from 0,
    /// which is the default class ordering when no explicit code is given.
    /// Deterministic for any input order.
    pub fn infer<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = labels
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        if distinct.is_empty() {
            return Err(Error::InvalidLabelCode(
                "cannot infer a label code from zero labels".to_string(),
            ));
        }
        let map: BTreeMap<String, usize> = distinct
            .into_iter()
            .enumerate()
            .map(|(index, raw)| (raw, index))
            .collect();
        let n_classes = map.len();
        Ok(Self { map, n_classes })
    }

    /// Class index for a raw label value
    pub fn encode(&self, raw: &str) -> Result<usize> {
        self.map
            .get(raw)
            .copied()
            .ok_or_else(|| Error::UnknownLabel(raw.to_string()))
    }

    /// Canonical raw value for a class index
    ///
    /// When several raw values share the index, the lexicographically
    /// smallest one is canonical.
    pub fn canonical_name(&self, index: usize) -> Option<&str> {
        self.map
            .iter()
            .find(|(_, &i)| i == index)
            .map(|(raw, _)| raw.as_str())
    }

    /// Number of classes (size of the index set)
    pub fn class_count(&self) -> usize {
        self.n_classes
    }

    /// Whether a raw value is present in the code
    pub fn contains(&self, raw: &str) -> bool {
        self.map.contains_key(raw)
    }

    /// All `(raw value, class index)` pairs in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.map.iter().map(|(raw, &index)| (raw.as_str(), index))
    }
}

/// Check that the used indices cover `0..C` without gaps
fn validate_indices(map: &BTreeMap<String, usize>) -> Result<usize> {
    if map.is_empty() {
        return Err(Error::InvalidLabelCode("no entries".to_string()));
    }
    let used: BTreeSet<usize> = map.values().copied().collect();
    let max = *used.iter().next_back().unwrap_or(&0);
    for index in 0..=max {
        if !used.contains(&index) {
            return Err(Error::InvalidLabelCode(format!(
                "class indices are not contiguous: index {index} unused"
            )));
        }
    }
    Ok(max + 1)
}

impl TryFrom<BTreeMap<String, usize>> for LabelCode {
    type Error = Error;

    fn try_from(map: BTreeMap<String, usize>) -> Result<Self> {
        let n_classes = validate_indices(&map)?;
        Ok(Self { map, n_classes })
    }
}

impl From<LabelCode> for BTreeMap<String, usize> {
    fn from(code: LabelCode) -> Self {
        code.map
    }
}
