//! Ground-truth labels keyed by subject/session

use crate::error::{Error, Result};
use crate::label::LabelCode;
use std::collections::BTreeMap;

/// Read-only map from (participant, session) to ground-truth class index
///
/// Built once from a labels table through a [`LabelCode`], then shared freely
/// across threads. A subject may appear on many rows (one per slice); the
/// rows must agree on the class, though they may use different synonyms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroundTruth {
    map: BTreeMap<(String, String), (usize, String)>,
}

impl GroundTruth {
    /// Build from `(participant, session, raw label)` rows
    ///
    /// Fails with [`Error::UnknownLabel`] when a raw label is missing from
    /// the code and with [`Error::ConflictingLabel`] when one subject carries
    /// two labels that encode to different classes.
    pub fn from_rows<'a, I>(rows: I, code: &LabelCode) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let mut map: BTreeMap<(String, String), (usize, String)> = BTreeMap::new();
        for (participant, session, raw) in rows {
            let class = code.encode(raw)?;
            let key = (participant.to_string(), session.to_string());
            match map.get(&key) {
                Some((existing, first)) if *existing != class => {
                    return Err(Error::ConflictingLabel {
                        subject: format!("{participant}/{session}"),
                        first: first.clone(),
                        second: raw.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    map.insert(key, (class, raw.to_string()));
                }
            }
        }
        Ok(Self { map })
    }

    /// Ground-truth class for one subject/session
    pub fn class_of(&self, participant: &str, session: &str) -> Result<usize> {
        self.map
            .get(&(participant.to_string(), session.to_string()))
            .map(|(class, _)| *class)
            .ok_or_else(|| Error::MissingGroundTruth(format!("{participant}/{session}")))
    }

    /// Number of subjects with a known label
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no subject has a label
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
