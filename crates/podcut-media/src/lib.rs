#![deny(unreachable_patterns)]
//! Filler detection and timeline editing for spoken-word audio.
//!
//! This crate provides:
//! - Token normalization and per-language filler gazetteers
//! - A three-pass detector for phrases, single fillers and stutter repeats
//! - An editor that removes decided ranges with linear crossfades
//! - WAV I/O, with FFmpeg transcoding for other input formats
//! - Atomic output file publishing

pub mod analysis;
pub mod command;
pub mod editing;
pub mod error;
pub mod fs_utils;
pub mod telemetry;
pub mod transcode;

pub use analysis::{detect, Analyzer, Gazetteer, GazetteerBuilder, PhrasePriority};
pub use command::{check_ffmpeg, FfmpegCommand};
pub use editing::{apply, get_duration, AudioBuffer, EditSummary, Editor, EditorConfig, PcmFormat};
pub use error::{MediaError, MediaResult, ValidationError};
pub use transcode::load_audio;
