//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// A decision list the editor refuses to apply.
///
/// Raised before any buffer mutation; `index` is the position of the
/// offending decision in the list handed to the editor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Decision {index} is inverted or empty: start {start:.3}s >= end {end:.3}s")]
    Inverted { index: usize, start: f64, end: f64 },

    #[error("Decision {index} starts before zero: {start:.3}s")]
    NegativeStart { index: usize, start: f64 },

    #[error("Decision {index} ends at {end:.3}s, past buffer duration {duration:.3}s")]
    OutOfRange { index: usize, end: f64, duration: f64 },

    #[error("Decision {index} ({start:.3}s) overlaps the previous decision ending at {previous_end:.3}s")]
    Overlapping {
        index: usize,
        start: f64,
        previous_end: f64,
    },

    #[error("Non-finite timestamp in decision {index}")]
    NonFinite { index: usize },
}

/// Errors that can occur during media processing.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid edit decisions: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to decode audio {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Failed to encode audio {path}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid audio buffer: {0}")]
    InvalidBuffer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create a decode failure error.
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an encode failure error.
    pub fn encode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Encode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create an invalid buffer error.
    pub fn invalid_buffer(message: impl Into<String>) -> Self {
        Self::InvalidBuffer(message.into())
    }

    /// Whether this error came from rejecting the decision list.
    pub fn is_validation(&self) -> bool {
        matches!(self, MediaError::Validation(_))
    }

    /// Whether this error means the input audio could not be read.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            MediaError::Decode { .. } | MediaError::FileNotFound(_) | MediaError::FfmpegFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts() {
        let err: MediaError = ValidationError::Inverted {
            index: 2,
            start: 1.0,
            end: 0.5,
        }
        .into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Decision 2"));
    }

    #[test]
    fn test_decode_classification() {
        assert!(MediaError::decode("a.wav", "bad header").is_decode());
        assert!(MediaError::FileNotFound(PathBuf::from("x.wav")).is_decode());
        assert!(!MediaError::FfmpegNotFound.is_decode());
    }
}
