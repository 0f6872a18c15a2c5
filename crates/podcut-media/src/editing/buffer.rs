//! In-memory PCM audio buffer.

use crate::error::{MediaError, MediaResult};

/// Interleaved `f32` PCM audio.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer from interleaved samples.
    ///
    /// The sample count must be a whole number of frames.
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> MediaResult<Self> {
        if channels == 0 {
            return Err(MediaError::invalid_buffer("channel count must be positive"));
        }
        if sample_rate == 0 {
            return Err(MediaError::invalid_buffer("sample rate must be positive"));
        }
        if samples.len() % channels as usize != 0 {
            return Err(MediaError::invalid_buffer(format!(
                "{} samples is not a whole number of {}-channel frames",
                samples.len(),
                channels
            )));
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    /// A buffer of `duration` seconds of silence.
    pub fn silence(duration: f64, channels: u16, sample_rate: u32) -> MediaResult<Self> {
        let frames = (duration.max(0.0) * sample_rate as f64).round() as usize;
        Self::new(vec![0.0; frames * channels as usize], channels, sample_rate)
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Consume the buffer and return its samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Frames per second.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Duration in seconds derived from frame count and sample rate.
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Convert seconds to the nearest frame index.
    pub fn frame_at(&self, secs: f64) -> usize {
        secs_to_frames(secs, self.sample_rate)
    }

    /// Samples for the frame at `frame` (one per channel).
    pub fn frame(&self, frame: usize) -> &[f32] {
        let ch = self.channels as usize;
        &self.samples[frame * ch..(frame + 1) * ch]
    }
}

/// Convert seconds to the nearest frame count at `sample_rate`.
pub fn secs_to_frames(secs: f64, sample_rate: u32) -> usize {
    (secs.max(0.0) * sample_rate as f64).round() as usize
}

/// Duration of `buffer` in seconds.
pub fn get_duration(buffer: &AudioBuffer) -> f64 {
    buffer.duration()
}
