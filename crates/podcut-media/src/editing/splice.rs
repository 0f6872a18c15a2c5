//! Region removal with a linear crossfade at the join.
//!
//! ```text
//!   head                 removed                tail
//! ──────────┬───────┬──────────────────┬───────┬──────────
//!           │ fade  │                  │ fade  │
//!           s-xf    s                  e      e+xf
//!
//! result: head[..s-xf] + mix(head[s-xf..s], tail[e..e+xf]) + tail[e+xf..]
//! ```
//!
//! The overlap shortens the result by `xf` beyond the removed region.

use crate::telemetry::SpliceKind;

/// Remove frames `start..end` from interleaved `samples`.
///
/// Crossfades over `crossfade` frames when both the head (`..start`) and the
/// tail (`end..`) are at least that long, otherwise joins them directly.
/// Bounds must already be validated: `start < end <= frames`.
pub fn remove_region(
    samples: &mut Vec<f32>,
    channels: usize,
    start: usize,
    end: usize,
    crossfade: usize,
) -> SpliceKind {
    let frames = samples.len() / channels;
    debug_assert!(start < end && end <= frames);

    let head = start;
    let tail = frames - end;

    if crossfade > 0 && head >= crossfade && tail >= crossfade {
        let fade_start = (start - crossfade) * channels;
        let tail_start = end * channels;
        for i in 0..crossfade {
            // Head fades 1 -> 0 while tail fades 0 -> 1
            let t = i as f32 / crossfade as f32;
            for c in 0..channels {
                let h = samples[fade_start + i * channels + c];
                let tl = samples[tail_start + i * channels + c];
                samples[fade_start + i * channels + c] = h * (1.0 - t) + tl * t;
            }
        }
        samples.drain(start * channels..(end + crossfade) * channels);
        SpliceKind::Crossfade
    } else {
        samples.drain(start * channels..end * channels);
        SpliceKind::Hard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_cut_when_no_crossfade() {
        let mut samples: Vec<f32> = (0..10).map(|i| i as f32).collect();
        let kind = remove_region(&mut samples, 1, 3, 6, 0);
        assert_eq!(kind, SpliceKind::Hard);
        assert_eq!(samples, vec![0.0, 1.0, 2.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_crossfade_blends_and_shortens() {
        let mut samples = vec![1.0; 4];
        samples.extend(vec![9.0; 2]);
        samples.extend(vec![0.0; 4]);
        let kind = remove_region(&mut samples, 1, 4, 6, 2);
        assert_eq!(kind, SpliceKind::Crossfade);
        // 10 - 2 removed - 2 overlap
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[..2], [1.0, 1.0]);
        // t = 0 keeps the head, t = 0.5 mixes evenly
        assert_eq!(samples[2], 1.0);
        assert!((samples[3] - 0.5).abs() < 1e-6);
        assert_eq!(samples[4..], [0.0, 0.0]);
    }

    #[test]
    fn test_short_head_falls_back_to_hard_cut() {
        let mut samples = vec![0.5; 10];
        let kind = remove_region(&mut samples, 1, 1, 4, 2);
        assert_eq!(kind, SpliceKind::Hard);
        assert_eq!(samples.len(), 7);
    }

    #[test]
    fn test_short_tail_falls_back_to_hard_cut() {
        let mut samples = vec![0.5; 10];
        let kind = remove_region(&mut samples, 1, 5, 9, 2);
        assert_eq!(kind, SpliceKind::Hard);
        assert_eq!(samples.len(), 6);
    }

    #[test]
    fn test_stereo_channels_blend_independently() {
        // frames: (1,-1) x2, removed x1, (0,0) x2
        let mut samples = vec![1.0, -1.0, 1.0, -1.0, 5.0, 5.0, 0.0, 0.0, 0.0, 0.0];
        let kind = remove_region(&mut samples, 2, 2, 3, 2);
        assert_eq!(kind, SpliceKind::Crossfade);
        assert_eq!(samples.len(), 2 * 2);
        assert_eq!(samples[..2], [1.0, -1.0]);
        assert!((samples[2] - 0.5).abs() < 1e-6);
        assert!((samples[3] + 0.5).abs() < 1e-6);
    }
}
