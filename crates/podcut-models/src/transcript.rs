//! Word-level transcript models.
//!
//! Transcripts are produced by an external speech-to-text engine and are
//! read-only here. The detector never looks at segment boundaries; it works
//! on the flattened token timeline returned by [`Transcript::words`].

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading transcript-shaped documents.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for transcript loading.
pub type TranscriptResult<T> = Result<T, TranscriptError>;

/// A word with timestamp information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Word {
    /// Raw word text as emitted by the transcriber
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Recognition confidence (0.0-1.0)
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

impl Word {
    /// Create a word with full confidence.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            confidence: 1.0,
        }
    }

    /// Builder-style setter for confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Duration of the word in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// A transcribed segment: a grouping container for words.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Segment start in seconds
    pub start: f64,

    /// Segment end in seconds
    pub end: f64,

    /// Words in transcript order
    #[serde(default)]
    pub words: Vec<Word>,

    /// Segment text
    #[serde(default)]
    pub text: String,
}

impl Segment {
    /// Build a segment whose bounds and text are derived from its words.
    pub fn from_words(words: Vec<Word>) -> Self {
        let start = words.first().map(|w| w.start).unwrap_or(0.0);
        let end = words.last().map(|w| w.end).unwrap_or(start);
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            start,
            end,
            words,
            text,
        }
    }
}

/// A full transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct Transcript {
    /// Language code reported by the transcriber, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Segments in transcript order
    pub segments: Vec<Segment>,
}

/// Accepts both `{ "segments": [...] }` and a bare array of segments.
#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptDocument {
    Full {
        #[serde(default)]
        language: Option<String>,
        segments: Vec<Segment>,
    },
    Bare(Vec<Segment>),
}

impl<'de> Deserialize<'de> for Transcript {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match TranscriptDocument::deserialize(deserializer)? {
            TranscriptDocument::Full { language, segments } => Self { language, segments },
            TranscriptDocument::Bare(segments) => Self {
                language: None,
                segments,
            },
        })
    }
}

impl Transcript {
    /// Create a transcript from segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            language: None,
            segments,
        }
    }

    /// Load a transcript from a JSON file.
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

    /// The flattened token timeline: all words of all segments in order.
    pub fn words(&self) -> Vec<Word> {
        self.segments
            .iter()
            .flat_map(|s| s.words.iter().cloned())
            .collect()
    }

    /// Total number of words across segments.
    pub fn word_count(&self) -> usize {
        self.segments.iter().map(|s| s.words.len()).sum()
    }

    /// Whether word timestamps are non-decreasing across the whole timeline.
    pub fn is_monotonic(&self) -> bool {
        let mut last_end = f64::NEG_INFINITY;
        for word in self.segments.iter().flat_map(|s| s.words.iter()) {
            if word.start > word.end || word.start < last_end {
                return false;
            }
            last_end = word.end;
        }
        true
    }
}
