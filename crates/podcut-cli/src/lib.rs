//! `podcut` command-line front end.
//!
//! Reads word-level transcripts, reports filler and repetition decisions,
//! and writes edited audio.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod metrics_export;
pub mod report;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
pub use report::{Report, ReportFormat};
