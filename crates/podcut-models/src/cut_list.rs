//! Externally supplied cut lists.
//!
//! A cut list is a hand-edited or tool-produced JSON document naming ranges to
//! remove. `{ "cuts": [...] }`, `{ "cuts": { "<id>": {...}, ... } }` and a
//! bare array are accepted.

use std::collections::BTreeMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::decision::{EditDecision, EditReason};
use crate::transcript::{TranscriptError, TranscriptResult};

/// A single range to remove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Cut {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Text covered by the cut (informational)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    /// Reason for the cut; defaults to filler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<EditReason>,
}

/// A list of cuts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct CutList {
    pub cuts: Vec<Cut>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CutListDocument {
    Wrapped { cuts: Vec<Cut> },
    Keyed { cuts: BTreeMap<String, Cut> },
    Bare(Vec<Cut>),
}

impl<'de> Deserialize<'de> for CutList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let cuts = match CutListDocument::deserialize(deserializer)? {
            CutListDocument::Wrapped { cuts } => cuts,
            CutListDocument::Keyed { cuts } => cuts.into_values().collect(),
            CutListDocument::Bare(cuts) => cuts,
        };
        Ok(Self { cuts })
    }
}

impl CutList {
    /// Load a cut list from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> TranscriptResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| TranscriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| TranscriptError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Convert into edit decisions sorted ascending by start.
    pub fn into_decisions(self) -> Vec<EditDecision> {
        let mut decisions: Vec<EditDecision> = self
            .cuts
            .into_iter()
            .map(|cut| EditDecision {
                start: cut.start,
                end: cut.end,
                reason: cut.reason.unwrap_or(EditReason::Filler),
                original_text: cut.text,
            })
            .collect();
        decisions.sort_by(|a, b| a.start.total_cmp(&b.start));
        decisions
    }
}

impl From<&[EditDecision]> for CutList {
    fn from(decisions: &[EditDecision]) -> Self {
        Self {
            cuts: decisions
                .iter()
                .map(|d| Cut {
                    start: d.start,
                    end: d.end,
                    text: d.original_text.clone(),
                    reason: Some(d.reason),
                })
                .collect(),
        }
    }
}
