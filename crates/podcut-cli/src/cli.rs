//! Command-line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use podcut_media::PhrasePriority;

#[derive(Debug, Parser)]
#[command(name = "podcut")]
#[command(version, about = "Remove fillers and repetitions from spoken-word audio")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write Prometheus metrics for this run to FILE
    #[arg(long, global = true, value_name = "FILE")]
    pub metrics_out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Detect fillers and repetitions in a transcript without editing
    Analyze(AnalyzeArgs),
    /// Detect fillers in a transcript and cut them from the audio
    Edit(EditArgs),
    /// Cut an externally supplied list of ranges from the audio
    Apply(ApplyArgs),
    /// Edit every `<name>.wav` + `<name>.json` pair in a directory
    Batch(BatchArgs),
    /// Print the JSON schema of an input or output document
    Schema(SchemaArgs),
}

/// Detector options shared by commands that analyze transcripts.
#[derive(Debug, Clone, Default, Args)]
pub struct DetectArgs {
    /// Language code of the built-in filler tables (ru, en)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Extra single-word filler (repeatable)
    #[arg(long = "filler", value_name = "WORD")]
    pub fillers: Vec<String>,

    /// Phrase matching priority: longest or declaration
    #[arg(long, value_name = "PRIORITY")]
    pub phrase_priority: Option<PhrasePriority>,
}

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArgs {
    /// Transcript JSON with word timestamps
    pub transcript: PathBuf,

    #[command(flatten)]
    pub detect: DetectArgs,

    /// Save a report (.json, .csv, or plain text)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Save the decisions as a cut list for `apply`
    #[arg(long, value_name = "FILE")]
    pub cuts: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    /// Input audio (WAV, or anything FFmpeg can decode)
    pub audio: PathBuf,

    /// Transcript JSON with word timestamps
    pub transcript: PathBuf,

    /// Output WAV file
    pub output: PathBuf,

    #[command(flatten)]
    pub detect: DetectArgs,

    /// Crossfade at each splice (milliseconds)
    #[arg(long)]
    pub crossfade_ms: Option<u64>,

    /// Show what would be removed without editing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Save an analysis report (.json, .csv, or plain text)
    #[arg(short = 'o', long = "report")]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ApplyArgs {
    /// Input audio (WAV, or anything FFmpeg can decode)
    pub audio: PathBuf,

    /// Cut list JSON: `{"cuts": [...]}` or a bare array
    pub cuts: PathBuf,

    /// Output WAV file
    pub output: PathBuf,

    /// Crossfade at each splice (milliseconds)
    #[arg(long)]
    pub crossfade_ms: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Directory containing `<name>.wav` and `<name>.json` pairs
    pub input_dir: PathBuf,

    /// Directory for edited audio
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub detect: DetectArgs,

    /// Crossfade at each splice (milliseconds)
    #[arg(long)]
    pub crossfade_ms: Option<u64>,

    /// Files edited concurrently
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Also write `<name>.report.json` next to each output
    #[arg(long)]
    pub reports: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaKind {
    Transcript,
    Decisions,
    Cuts,
}

#[derive(Debug, Clone, Args)]
pub struct SchemaArgs {
    /// Document to describe
    #[arg(value_enum, default_value = "transcript")]
    pub kind: SchemaKind,
}
