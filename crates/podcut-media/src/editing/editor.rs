//! Applying edit decisions to audio.

use std::path::{Path, PathBuf};
use std::time::Instant;

use podcut_models::EditDecision;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::buffer::{secs_to_frames, AudioBuffer};
use super::splice::remove_region;
use super::wav::{write_wav, PcmFormat};
use crate::error::{MediaError, MediaResult, ValidationError};
use crate::fs_utils::{ensure_parent, staging_dir};
use crate::telemetry::{self, SpliceKind};
use crate::transcode::load_audio;

/// Default splice crossfade.
pub const DEFAULT_CROSSFADE_MS: u64 = 20;

/// Configuration for the timeline editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Length of the linear crossfade at each splice (seconds).
    ///
    /// A splice is crossfaded only when the audio on both sides is at least
    /// this long; otherwise the two sides are joined directly.
    /// `0` disables crossfading.
    pub crossfade_secs: f64,

    /// Directory for temporary transcodes of non-WAV input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::from_ms(DEFAULT_CROSSFADE_MS)
    }
}

impl EditorConfig {
    /// Config with a crossfade of `crossfade_secs` seconds.
    pub fn from_secs(crossfade_secs: f64) -> Self {
        Self {
            crossfade_secs,
            work_dir: None,
        }
    }

    /// Config with a crossfade given in milliseconds.
    pub fn from_ms(crossfade_ms: u64) -> Self {
        Self::from_secs(crossfade_ms as f64 / 1000.0)
    }

    /// Set crossfade length in seconds.
    pub fn with_crossfade_secs(mut self, crossfade_secs: f64) -> Self {
        self.crossfade_secs = crossfade_secs;
        self
    }

    /// Set the transcode work directory.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(dir.into());
        self
    }

    /// Crossfade length in frames at `sample_rate`.
    ///
    /// Rounds to the nearest frame, like decision bounds.
    pub fn crossfade_frames(&self, sample_rate: u32) -> usize {
        secs_to_frames(self.crossfade_secs, sample_rate)
    }
}

/// Outcome of applying a decision list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditSummary {
    pub original_duration: f64,
    pub edited_duration: f64,
    /// Seconds removed, including crossfade overlap.
    pub removed: f64,
    pub decisions_applied: usize,
    /// Valid decisions shorter than half a frame, which remove nothing.
    pub decisions_skipped: usize,
    pub crossfaded_splices: usize,
    pub hard_splices: usize,
}

impl EditSummary {
    /// Share of the original duration that was removed, in percent.
    pub fn removed_percent(&self) -> f64 {
        if self.original_duration > 0.0 {
            self.removed / self.original_duration * 100.0
        } else {
            0.0
        }
    }
}

/// A decision resolved to frame bounds.
#[derive(Debug, Clone, Copy)]
struct FrameRange {
    index: usize,
    start: usize,
    end: usize,
}

/// Removes decided ranges from audio and smooths each splice.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    config: EditorConfig,
}

impl Editor {
    /// Create a new editor.
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    /// The editor configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Duration of `buffer` in seconds.
    pub fn get_duration(&self, buffer: &AudioBuffer) -> f64 {
        buffer.duration()
    }

    /// Return a new buffer with every decided range removed.
    ///
    /// `original` is never modified. The whole list is validated before
    /// any sample is touched.
    pub fn apply(&self, original: &AudioBuffer, decisions: &[EditDecision]) -> MediaResult<AudioBuffer> {
        self.apply_with_summary(original, decisions).map(|(buffer, _)| buffer)
    }

    /// Like [`apply`](Self::apply), also reporting what was done.
    pub fn apply_with_summary(
        &self,
        original: &AudioBuffer,
        decisions: &[EditDecision],
    ) -> MediaResult<(AudioBuffer, EditSummary)> {
        let mut ranges = validate_decisions(original, decisions)?;
        let channels = original.channels() as usize;
        let crossfade = self.config.crossfade_frames(original.sample_rate());

        let mut samples = original.samples().to_vec();
        let mut summary = EditSummary {
            original_duration: original.duration(),
            ..Default::default()
        };

        // Back to front so earlier bounds stay valid
        ranges.sort_by(|a, b| b.start.cmp(&a.start));
        for range in &ranges {
            if range.start == range.end {
                debug!(
                    index = range.index,
                    start = decisions[range.index].start,
                    end = decisions[range.index].end,
                    "Decision rounds to zero frames, skipped"
                );
                summary.decisions_skipped += 1;
                continue;
            }
            let kind = remove_region(&mut samples, channels, range.start, range.end, crossfade);
            match kind {
                SpliceKind::Crossfade => summary.crossfaded_splices += 1,
                SpliceKind::Hard => summary.hard_splices += 1,
            }
            summary.decisions_applied += 1;
            telemetry::record_splice(kind);
        }

        let edited = AudioBuffer::new(samples, original.channels(), original.sample_rate())?;
        summary.edited_duration = edited.duration();
        summary.removed = summary.original_duration - summary.edited_duration;
        telemetry::record_removed(summary.removed);

        debug!(
            decisions = summary.decisions_applied,
            skipped = summary.decisions_skipped,
            crossfaded = summary.crossfaded_splices,
            hard = summary.hard_splices,
            removed = summary.removed,
            "Applied edit decisions"
        );

        Ok((edited, summary))
    }

    /// Decode `input`, apply `decisions` and write the result to `output`.
    ///
    /// Output is 16-bit PCM WAV, or 32-bit float when the input was float,
    /// with the input's channel count and sample rate. It is written to a
    /// temporary file next to `output` and renamed into place, so any
    /// failure leaves an existing `output` untouched.
    pub async fn edit_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        decisions: &[EditDecision],
    ) -> MediaResult<EditSummary> {
        let input = input.as_ref();
        let output = output.as_ref();
        let started = Instant::now();

        let (original, format) = load_audio(input, self.config.work_dir.as_deref()).await?;
        let format = match format {
            PcmFormat::Float => PcmFormat::Float,
            PcmFormat::Int(_) => PcmFormat::Int(16),
        };

        let editor = self.clone();
        let owned = decisions.to_vec();
        let (edited, summary) =
            tokio::task::spawn_blocking(move || editor.apply_with_summary(&original, &owned))
                .await
                .map_err(|e| MediaError::invalid_buffer(format!("edit task failed: {}", e)))??;

        ensure_parent(output).await?;
        let staged = tempfile::Builder::new()
            .prefix(".podcut-")
            .suffix(".wav")
            .tempfile_in(staging_dir(output))?
            .into_temp_path();

        // Same directory as `output`, so the rename never crosses devices
        let destination = output.to_path_buf();
        tokio::task::spawn_blocking(move || -> MediaResult<()> {
            write_wav(&staged, &edited, format)?;
            staged.persist(&destination).map_err(|e| MediaError::from(e.error))
        })
        .await
        .map_err(|e| MediaError::encode(output, e.to_string()))??;

        let elapsed = started.elapsed().as_secs_f64();
        telemetry::record_edit_duration(elapsed);
        info!(
            input = %input.display(),
            output = %output.display(),
            original = summary.original_duration,
            edited = summary.edited_duration,
            elapsed_secs = elapsed,
            "Edited audio written"
        );

        Ok(summary)
    }
}

/// Apply `decisions` to `original` with a crossfade of `crossfade_secs`.
pub fn apply(
    original: &AudioBuffer,
    decisions: &[EditDecision],
    crossfade_secs: f64,
) -> MediaResult<AudioBuffer> {
    Editor::new(EditorConfig::from_secs(crossfade_secs)).apply(original, decisions)
}

/// Check every decision against the buffer and each other.
///
/// Bounds and overlaps are checked in seconds, before rounding to frames.
/// Returns the decisions as frame ranges in input order.
fn validate_decisions(
    buffer: &AudioBuffer,
    decisions: &[EditDecision],
) -> Result<Vec<FrameRange>, ValidationError> {
    let duration = buffer.duration();

    for (index, d) in decisions.iter().enumerate() {
        if !d.start.is_finite() || !d.end.is_finite() {
            return Err(ValidationError::NonFinite { index });
        }
        if d.start < 0.0 {
            return Err(ValidationError::NegativeStart { index, start: d.start });
        }
        if d.start >= d.end {
            return Err(ValidationError::Inverted {
                index,
                start: d.start,
                end: d.end,
            });
        }
        if d.end > duration {
            return Err(ValidationError::OutOfRange {
                index,
                end: d.end,
                duration,
            });
        }
    }

    let mut by_start: Vec<usize> = (0..decisions.len()).collect();
    by_start.sort_by(|&a, &b| decisions[a].start.total_cmp(&decisions[b].start).then(a.cmp(&b)));
    for pair in by_start.windows(2) {
        let (prev, next) = (&decisions[pair[0]], &decisions[pair[1]]);
        if prev.end > next.start {
            return Err(ValidationError::Overlapping {
                index: pair[1],
                start: next.start,
                previous_end: prev.end,
            });
        }
    }

    // Rounding is monotonic, so disjoint ranges stay disjoint in frames
    Ok(decisions
        .iter()
        .enumerate()
        .map(|(index, d)| FrameRange {
            index,
            start: buffer.frame_at(d.start),
            end: buffer.frame_at(d.end),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcut_models::EditReason;

    fn ramp(secs: f64, sample_rate: u32) -> AudioBuffer {
        let frames = (secs * sample_rate as f64).round() as usize;
        let samples = (0..frames).map(|i| i as f32 / frames as f32).collect();
        AudioBuffer::new(samples, 1, sample_rate).unwrap()
    }

    fn cut(start: f64, end: f64) -> EditDecision {
        EditDecision::new(start, end, EditReason::Filler, "")
    }

    #[test]
    fn test_empty_list_copies() {
        let original = ramp(2.0, 1000);
        let edited = Editor::default().apply(&original, &[]).unwrap();
        assert_eq!(edited, original);
    }

    #[test]
    fn test_crossfaded_duration() {
        let original = ramp(10.0, 1000);
        let editor = Editor::new(EditorConfig::from_ms(20));
        let (edited, summary) = editor
            .apply_with_summary(&original, &[cut(2.0, 3.0), cut(5.0, 5.5)])
            .unwrap();
        // 10 - 1.5 removed - 2 * 0.02 overlap
        assert!((edited.duration() - 8.46).abs() < 1e-9);
        assert_eq!(summary.crossfaded_splices, 2);
        assert_eq!(summary.hard_splices, 0);
        assert!((summary.removed - 1.54).abs() < 1e-9);
    }

    #[test]
    fn test_hard_cut_at_edges() {
        let original = ramp(1.0, 1000);
        let editor = Editor::new(EditorConfig::from_ms(20));
        let (edited, summary) = editor
            .apply_with_summary(&original, &[cut(0.0, 0.1), cut(0.99, 1.0)])
            .unwrap();
        assert!((edited.duration() - 0.89).abs() < 1e-9);
        assert_eq!(summary.hard_splices, 2);
    }

    #[test]
    fn test_zero_crossfade_is_exact() {
        let original = ramp(3.0, 1000);
        let edited = apply(&original, &[cut(1.0, 2.0)], 0.0).unwrap();
        assert!((edited.duration() - 2.0).abs() < 1e-9);
        // Sample right after the splice is the first tail sample
        assert_eq!(edited.samples()[1000], original.samples()[2000]);
    }

    #[test]
    fn test_original_untouched_and_input_order_irrelevant() {
        let original = ramp(4.0, 1000);
        let before = original.clone();
        let editor = Editor::default();
        let a = editor.apply(&original, &[cut(1.0, 1.5), cut(2.5, 3.0)]).unwrap();
        let b = editor.apply(&original, &[cut(2.5, 3.0), cut(1.0, 1.5)]).unwrap();
        assert_eq!(a, b);
        assert_eq!(original, before);
    }

    #[test]
    fn test_adjacent_decisions_allowed() {
        let original = ramp(4.0, 1000);
        let edited = apply(&original, &[cut(1.0, 1.5), cut(1.5, 2.0)], 0.0).unwrap();
        assert!((edited.duration() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejections() {
        let original = ramp(2.0, 1000);
        let editor = Editor::default();

        let err = editor.apply(&original, &[cut(1.0, 0.5)]).unwrap_err();
        assert!(matches!(
            err,
            MediaError::Validation(ValidationError::Inverted { index: 0, .. })
        ));

        let err = editor.apply(&original, &[cut(0.5, 0.5)]).unwrap_err();
        assert!(matches!(err, MediaError::Validation(ValidationError::Inverted { .. })));

        let err = editor.apply(&original, &[cut(-0.1, 0.5)]).unwrap_err();
        assert!(matches!(
            err,
            MediaError::Validation(ValidationError::NegativeStart { .. })
        ));

        let err = editor
            .apply(&original, &[cut(0.1, 0.2), cut(1.5, 2.5)])
            .unwrap_err();
        assert!(matches!(
            err,
            MediaError::Validation(ValidationError::OutOfRange { index: 1, .. })
        ));

        let err = editor
            .apply(&original, &[cut(0.5, 1.0), cut(0.8, 1.2)])
            .unwrap_err();
        assert!(matches!(
            err,
            MediaError::Validation(ValidationError::Overlapping { index: 1, .. })
        ));

        let err = editor.apply(&original, &[cut(f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(err, MediaError::Validation(ValidationError::NonFinite { index: 0 })));
    }

    #[test]
    fn test_end_at_duration_accepted() {
        let original = ramp(2.0, 1000);
        let edited = apply(&original, &[cut(1.0, 2.0)], 0.02).unwrap();
        assert!((edited.duration() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_end_past_duration_by_sub_frame_rejected() {
        // 2000 frames at 1 kHz; 2.0004 would round back to frame 2000
        let original = ramp(2.0, 1000);
        let err = apply(&original, &[cut(1.0, 2.0004)], 0.0).unwrap_err();
        assert!(matches!(
            err,
            MediaError::Validation(ValidationError::OutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn test_sub_frame_overlap_rejected() {
        let original = ramp(2.0, 1000);
        let err = apply(&original, &[cut(0.5, 1.0003), cut(1.0001, 1.5)], 0.0).unwrap_err();
        assert!(matches!(
            err,
            MediaError::Validation(ValidationError::Overlapping { index: 1, .. })
        ));
    }

    #[test]
    fn test_sub_frame_decision_counted_as_skipped() {
        let original = ramp(2.0, 1000);
        let (edited, summary) = Editor::new(EditorConfig::from_secs(0.0))
            .apply_with_summary(&original, &[cut(0.5, 0.5004), cut(1.0, 1.5)])
            .unwrap();
        assert_eq!(summary.decisions_applied, 1);
        assert_eq!(summary.decisions_skipped, 1);
        assert!((edited.duration() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_crossfade_frames() {
        assert_eq!(EditorConfig::from_ms(20).crossfade_frames(44100), 882);
        assert_eq!(EditorConfig::from_ms(0).crossfade_frames(44100), 0);
        assert!((EditorConfig::default().crossfade_secs - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_crossfade_rounds_like_decisions() {
        let config = EditorConfig::from_secs(0.0016);
        assert_eq!(config.crossfade_frames(1000), 2);
        assert_eq!(config.crossfade_frames(1000), secs_to_frames(0.0016, 1000));
    }

    #[test]
    fn test_removed_percent() {
        let summary = EditSummary {
            original_duration: 10.0,
            removed: 2.5,
            ..Default::default()
        };
        assert!((summary.removed_percent() - 25.0).abs() < 1e-9);
        assert_eq!(EditSummary::default().removed_percent(), 0.0);
    }
}
