//! WAV decoding and encoding via `hound`.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::debug;

use super::buffer::AudioBuffer;
use crate::error::{MediaError, MediaResult};

/// On-disk sample encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcmFormat {
    /// Signed integer PCM with the given bit depth (8, 16, 24 or 32).
    Int(u16),
    /// 32-bit IEEE float.
    Float,
}

impl Default for PcmFormat {
    fn default() -> Self {
        PcmFormat::Int(16)
    }
}

impl PcmFormat {
    fn spec(&self, channels: u16, sample_rate: u32) -> WavSpec {
        let (bits_per_sample, sample_format) = match *self {
            PcmFormat::Int(bits) => (bits, SampleFormat::Int),
            PcmFormat::Float => (32, SampleFormat::Float),
        };
        WavSpec {
            channels,
            sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

fn int_scale(bits: u16) -> f32 {
    ((1i64 << (bits - 1)) - 1) as f32
}

/// Decode a PCM WAV file into a buffer, along with its sample encoding.
pub fn read_wav(path: &Path) -> MediaResult<(AudioBuffer, PcmFormat)> {
    let mut reader = WavReader::open(path).map_err(|e| MediaError::decode(path, e.to_string()))?;
    let spec = reader.spec();

    debug!(path = %path.display(), ?spec, "Loading WAV file");

    let (samples, format): (Result<Vec<f32>, hound::Error>, PcmFormat) = match spec.sample_format {
        SampleFormat::Int => match spec.bits_per_sample {
            bits @ (8 | 16 | 24 | 32) => {
                let scale = int_scale(bits);
                (
                    reader
                        .samples::<i32>()
                        .map(|s| s.map(|v| v as f32 / scale))
                        .collect(),
                    PcmFormat::Int(bits),
                )
            }
            other => {
                return Err(MediaError::decode(
                    path,
                    format!("unsupported bit depth: {}", other),
                ))
            }
        },
        SampleFormat::Float => (reader.samples::<f32>().collect(), PcmFormat::Float),
    };

    let samples = samples.map_err(|e| MediaError::decode(path, e.to_string()))?;
    let buffer = AudioBuffer::new(samples, spec.channels, spec.sample_rate)
        .map_err(|e| MediaError::decode(path, e.to_string()))?;

    debug!(
        path = %path.display(),
        frames = buffer.frames(),
        duration = buffer.duration(),
        "Loaded WAV file"
    );
    Ok((buffer, format))
}

/// Encode a buffer as a WAV file.
pub fn write_wav(path: &Path, buffer: &AudioBuffer, format: PcmFormat) -> MediaResult<()> {
    let spec = format.spec(buffer.channels(), buffer.sample_rate());
    let encode_err = |e: hound::Error| MediaError::encode(path, e.to_string());

    let mut writer = WavWriter::create(path, spec).map_err(encode_err)?;
    match format {
        PcmFormat::Int(bits) => {
            let scale = int_scale(bits);
            for sample in buffer.samples() {
                let value = (sample.clamp(-1.0, 1.0) * scale).round() as i32;
                writer.write_sample(value).map_err(encode_err)?;
            }
        }
        PcmFormat::Float => {
            for sample in buffer.samples() {
                writer.write_sample(*sample).map_err(encode_err)?;
            }
        }
    }
    writer.finalize().map_err(encode_err)?;

    debug!(path = %path.display(), frames = buffer.frames(), "Saved WAV file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_int16_round_trip_keeps_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        let samples: Vec<f32> = (0..200).map(|i| ((i as f32) * 0.05).sin() * 0.5).collect();
        let buffer = AudioBuffer::new(samples, 2, 8000).unwrap();

        write_wav(&path, &buffer, PcmFormat::Int(16)).unwrap();
        let (decoded, format) = read_wav(&path).unwrap();

        assert_eq!(format, PcmFormat::Int(16));
        assert_eq!(decoded.channels(), 2);
        assert_eq!(decoded.sample_rate(), 8000);
        assert_eq!(decoded.frames(), 100);
        for (a, b) in buffer.samples().iter().zip(decoded.samples()) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_float_is_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("float.wav");
        let buffer = AudioBuffer::new(vec![0.25, -0.125, 1.5], 1, 1000).unwrap();

        write_wav(&path, &buffer, PcmFormat::Float).unwrap();
        let (decoded, format) = read_wav(&path).unwrap();

        assert_eq!(format, PcmFormat::Float);
        assert_eq!(decoded.samples(), buffer.samples());
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.wav");
        std::fs::write(&path, b"definitely not a wav file").unwrap();

        let err = read_wav(&path).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_int_clipping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.wav");
        let buffer = AudioBuffer::new(vec![2.0, -2.0], 1, 1000).unwrap();

        write_wav(&path, &buffer, PcmFormat::Int(16)).unwrap();
        let (decoded, _) = read_wav(&path).unwrap();
        assert!((decoded.samples()[0] - 1.0).abs() < 1e-6);
        assert!((decoded.samples()[1] + 1.0).abs() < 1e-6);
    }
}
