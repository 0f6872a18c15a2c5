//! Edit decisions: time ranges designated for removal.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::TimeKey;

/// Why a range is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditReason {
    /// Gazetteer filler token or phrase
    Filler,
    /// Immediate repeat of the preceding token
    Repetition,
}

impl EditReason {
    /// Stable label used in reports and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditReason::Filler => "filler",
            EditReason::Repetition => "repetition",
        }
    }
}

impl fmt::Display for EditReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time range, with a reason, designated for removal from the source audio.
///
/// `start`/`end` coincide with the timestamps of the word(s) it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EditDecision {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Why this range is removed
    pub reason: EditReason,

    /// Raw (unnormalized) text of the covered word(s)
    #[serde(default)]
    pub original_text: String,
}

impl EditDecision {
    /// Create a new decision.
    pub fn new(start: f64, end: f64, reason: EditReason, original_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            reason,
            original_text: original_text.into(),
        }
    }

    /// Length of the removed range in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Millisecond key of this decision's range.
    pub fn key(&self) -> TimeKey {
        TimeKey::new(self.start, self.end)
    }
}

/// Sum of the removed spans in seconds.
pub fn total_removed(decisions: &[EditDecision]) -> f64 {
    decisions.iter().map(EditDecision::duration).sum()
}
