//! Shared data models for podcut.
//!
//! This crate provides Serde-serializable types for:
//! - Word-level transcripts (words, segments, the flattened token timeline)
//! - Edit decisions produced by the detector
//! - Externally supplied cut lists
//! - Timestamp rounding used by every report projection

pub mod cut_list;
pub mod decision;
pub mod timestamp;
pub mod transcript;

// Re-export common types
pub use cut_list::{Cut, CutList};
pub use decision::{total_removed, EditDecision, EditReason};
pub use timestamp::{format_seconds, round_ms, TimeKey};
pub use transcript::{Segment, Transcript, TranscriptError, TranscriptResult, Word};
