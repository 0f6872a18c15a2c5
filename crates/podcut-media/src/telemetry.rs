//! Prometheus metrics for detection and editing.
//!
//! Recording is a no-op until a recorder is installed (the CLI installs one
//! when `--metrics-out` is given).

use metrics::{counter, histogram};
use podcut_models::EditDecision;

/// Metric names as constants for consistency.
pub mod names {
    pub const DECISIONS_TOTAL: &str = "podcut_decisions_total";
    pub const SPLICES_TOTAL: &str = "podcut_splices_total";
    pub const REMOVED_SECONDS: &str = "podcut_removed_seconds";
    pub const EDIT_DURATION_SECONDS: &str = "podcut_edit_duration_seconds";
    pub const FILES_PROCESSED_TOTAL: &str = "podcut_files_processed_total";
}

/// Kind of join made when a region is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceKind {
    Crossfade,
    Hard,
}

impl SpliceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpliceKind::Crossfade => "crossfade",
            SpliceKind::Hard => "hard",
        }
    }
}

/// Count decisions by reason.
pub fn record_decisions(decisions: &[EditDecision]) {
    for decision in decisions {
        let labels = [("reason", decision.reason.as_str().to_string())];
        counter!(names::DECISIONS_TOTAL, &labels).increment(1);
    }
}

/// Record a splice.
pub fn record_splice(kind: SpliceKind) {
    let labels = [("kind", kind.as_str().to_string())];
    counter!(names::SPLICES_TOTAL, &labels).increment(1);
}

/// Record seconds of audio removed by one edit.
pub fn record_removed(secs: f64) {
    histogram!(names::REMOVED_SECONDS).record(secs);
}

/// Record wall time spent applying an edit.
pub fn record_edit_duration(secs: f64) {
    histogram!(names::EDIT_DURATION_SECONDS).record(secs);
}

/// Record a processed file and its outcome.
pub fn record_file_processed(success: bool) {
    let labels = [("status", if success { "success" } else { "error" }.to_string())];
    counter!(names::FILES_PROCESSED_TOTAL, &labels).increment(1);
}
