//! Loading audio of any container FFmpeg understands.
//!
//! PCM WAV is decoded directly. Everything else is transcoded to a
//! temporary 16-bit WAV first.

use std::path::Path;

use tracing::{debug, info};

use crate::command::FfmpegCommand;
use crate::editing::{read_wav, AudioBuffer, PcmFormat};
use crate::error::{MediaError, MediaResult};

/// Whether `path` has a `.wav` extension (case-insensitive).
pub fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav") || e.eq_ignore_ascii_case("wave"))
}

/// Decode `path` into a buffer.
///
/// `work_dir` is where temporary transcodes are placed; `None` uses the
/// system temp directory.
pub async fn load_audio(path: &Path, work_dir: Option<&Path>) -> MediaResult<(AudioBuffer, PcmFormat)> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    if is_wav(path) {
        let owned = path.to_path_buf();
        return tokio::task::spawn_blocking(move || read_wav(&owned))
            .await
            .map_err(|e| MediaError::decode(path, e.to_string()))?;
    }

    let tmp = match work_dir {
        Some(dir) => tempfile::Builder::new().suffix(".wav").tempfile_in(dir)?,
        None => tempfile::Builder::new().suffix(".wav").tempfile()?,
    };
    let tmp_path = tmp.path().to_path_buf();

    info!(input = %path.display(), "Transcoding to WAV");
    FfmpegCommand::new(path, &tmp_path)
        .no_video()
        .audio_codec("pcm_s16le")
        .run()
        .await
        .map_err(|e| match e {
            MediaError::FfmpegFailed { stderr, .. } => MediaError::decode(
                path,
                stderr.unwrap_or_else(|| "ffmpeg could not decode input".to_string()),
            ),
            other => other,
        })?;

    let (buffer, _) = tokio::task::spawn_blocking(move || {
        let decoded = read_wav(&tmp_path);
        drop(tmp);
        decoded
    })
    .await
    .map_err(|e| MediaError::decode(path, e.to_string()))??;

    debug!(input = %path.display(), duration = buffer.duration(), "Transcoded input decoded");
    Ok((buffer, PcmFormat::Int(16)))
}
