//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

use podcut_media::MediaError;
use podcut_models::TranscriptError;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced by `podcut` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error("Failed to write report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Metrics error: {0}")]
    Metrics(String),

    #[error("Invalid input directory {0}: no <name>.wav files with matching <name>.json transcripts")]
    EmptyBatch(PathBuf),

    #[error("{failed} of {total} batch items failed")]
    BatchFailed { failed: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create a report write error.
    pub fn report(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Report {
            path: path.into(),
            source,
        }
    }

    /// Create a metrics error.
    pub fn metrics(msg: impl Into<String>) -> Self {
        Self::Metrics(msg.into())
    }
}
