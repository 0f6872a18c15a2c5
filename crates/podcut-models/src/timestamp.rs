//! Timestamp rounding and formatting utilities.
//!
//! Every externally emitted timestamp is rounded to whole milliseconds so
//! that two records referencing the same word produce identical keys.

use serde::{Deserialize, Serialize};

/// Round seconds to three decimal places.
///
/// # Examples
/// ```
/// use podcut_models::timestamp::round_ms;
/// assert_eq!(round_ms(1.23449), 1.234);
/// assert_eq!(round_ms(1.2346), 1.235);
/// ```
pub fn round_ms(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}

/// Convert seconds to whole milliseconds.
pub fn to_millis(secs: f64) -> i64 {
    (secs * 1000.0).round() as i64
}

/// Millisecond-precision `(start, end)` key for a time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeKey {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeKey {
    /// Build a key from a range in seconds.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start_ms: to_millis(start),
            end_ms: to_millis(end),
        }
    }

    /// Whether `other` lies entirely inside this range.
    pub fn contains(&self, other: &TimeKey) -> bool {
        self.start_ms <= other.start_ms && other.end_ms <= self.end_ms
    }
}

/// Format seconds into HH:MM:SS or HH:MM:SS.mmm string.
pub fn format_seconds(total_secs: f64) -> String {
    let total_secs = round_ms(total_secs.max(0.0));
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = total_secs % 60.0;

    // Include milliseconds if present
    if (secs - secs.floor()).abs() > 0.0001 {
        format!("{:02}:{:02}:{:06.3}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, mins, secs.floor() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_ms() {
        assert_eq!(round_ms(0.0), 0.0);
        assert_eq!(round_ms(12.3456), 12.346);
        assert_eq!(round_ms(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_time_key_equal_for_float_noise() {
        let a = TimeKey::new(1.2, 1.5);
        let b = TimeKey::new(1.2000000001, 1.4999999999);
        assert_eq!(a, b);
    }

    #[test]
    fn test_time_key_contains() {
        let phrase = TimeKey::new(1.0, 2.0);
        assert!(phrase.contains(&TimeKey::new(1.0, 1.4)));
        assert!(phrase.contains(&TimeKey::new(1.5, 2.0)));
        assert!(!phrase.contains(&TimeKey::new(1.9, 2.1)));
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "00:00:00");
        assert_eq!(format_seconds(90.0), "00:01:30");
        assert_eq!(format_seconds(3661.0), "01:01:01");
        assert_eq!(format_seconds(61.25), "00:01:01.250");
    }
}
