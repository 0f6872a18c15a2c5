//! Report projections of an analysis: JSON, CSV and plain text.
//!
//! The format is picked from the output file extension. Every word of the
//! transcript is listed with a label: `keep`, or the reason of the decision
//! whose time range contains it.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use podcut_models::{round_ms, EditDecision, Segment, TimeKey, Transcript};
use serde::Serialize;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Label for words no decision covers.
pub const KEEP_LABEL: &str = "keep";

/// Output projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Csv,
    Text,
}

impl ReportFormat {
    /// Choose a format from the path extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => ReportFormat::Json,
            Some("csv") => ReportFormat::Csv,
            _ => ReportFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportWord {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSegmentWord {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSegment {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub words: Vec<ReportSegmentWord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportFiller {
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub total_segments: usize,
    pub total_words: usize,
    pub fillers_count: usize,
    pub removed_seconds: f64,
    pub generated_at: DateTime<Utc>,
}

/// Serializable analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub segments: Vec<ReportSegment>,
    pub words: Vec<ReportWord>,
    pub fillers: Vec<ReportFiller>,
    pub summary: ReportSummary,
}

impl Report {
    /// Build a report for a transcript and its decisions.
    pub fn build(transcript: &Transcript, decisions: &[EditDecision]) -> Self {
        let keys: Vec<(TimeKey, &EditDecision)> = decisions.iter().map(|d| (d.key(), d)).collect();

        let words: Vec<ReportWord> = transcript
            .segments
            .iter()
            .flat_map(|s| s.words.iter())
            .map(|w| {
                let key = TimeKey::new(w.start, w.end);
                let label = keys
                    .iter()
                    .find(|(k, _)| k.contains(&key))
                    .map(|(_, d)| d.reason.as_str())
                    .unwrap_or(KEEP_LABEL);
                ReportWord {
                    text: w.text.clone(),
                    start: round_ms(w.start),
                    end: round_ms(w.end),
                    confidence: round_ms(w.confidence),
                    label: label.to_string(),
                }
            })
            .collect();

        let fillers = decisions
            .iter()
            .map(|d| ReportFiller {
                text: d.original_text.clone(),
                start: round_ms(d.start),
                end: round_ms(d.end),
                reason: d.reason.as_str().to_string(),
            })
            .collect();

        let summary = ReportSummary {
            total_segments: transcript.segments.len(),
            total_words: words.len(),
            fillers_count: decisions.len(),
            removed_seconds: round_ms(podcut_models::total_removed(decisions)),
            generated_at: Utc::now(),
        };

        Self {
            segments: transcript.segments.iter().map(project_segment).collect(),
            words,
            fillers,
            summary,
        }
    }

    /// JSON projection.
    pub fn to_json(&self) -> CliResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// CSV projection: `text,start,end,confidence,label`.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("text,start,end,confidence,label\r\n");
        for w in &self.words {
            let _ = write!(
                out,
                "{},{},{},{},{}\r\n",
                csv_field(&w.text),
                w.start,
                w.end,
                w.confidence,
                csv_field(&w.label)
            );
        }
        out
    }

    /// Plain-text listing.
    pub fn to_text(&self) -> String {
        let mut out = String::from("# Transcription Results\n\n## Words with timestamps\n\n");
        for w in &self.words {
            let _ = write!(out, "{:.3} - {:.3}: {}", w.start, w.end, w.text);
            if w.label != KEEP_LABEL {
                let _ = write!(out, " [{}]", w.label);
            }
            out.push('\n');
        }
        out.push_str("\n## Summary\n");
        let _ = writeln!(out, "Total words: {}", self.summary.total_words);
        let _ = writeln!(out, "Fillers to remove: {}", self.summary.fillers_count);
        let _ = writeln!(out, "Time to remove: {:.3}s", self.summary.removed_seconds);
        out
    }

    /// Render in `format`.
    pub fn render(&self, format: ReportFormat) -> CliResult<String> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Csv => Ok(self.to_csv()),
            ReportFormat::Text => Ok(self.to_text()),
        }
    }

    /// Write the report, choosing the format from the extension.
    pub async fn save(&self, path: &Path) -> CliResult<()> {
        let format = ReportFormat::from_path(path);
        let body = self.render(format)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| CliError::report(path, e))?;
            }
        }
        tokio::fs::write(path, body)
            .await
            .map_err(|e| CliError::report(path, e))?;
        debug!(path = %path.display(), ?format, words = self.words.len(), "Report saved");
        Ok(())
    }
}

fn project_segment(segment: &Segment) -> ReportSegment {
    ReportSegment {
        text: segment.text.clone(),
        start: round_ms(segment.start),
        end: round_ms(segment.end),
        words: segment
            .words
            .iter()
            .map(|w| ReportSegmentWord {
                text: w.text.clone(),
                start: round_ms(w.start),
                end: round_ms(w.end),
                confidence: round_ms(w.confidence),
            })
            .collect(),
    }
}

/// Quote a CSV field when it contains a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podcut_media::{detect, Gazetteer};
    use podcut_models::Word;

    fn sample() -> (Transcript, Vec<EditDecision>) {
        let transcript = Transcript::new(vec![Segment::from_words(vec![
            Word::new("Well,", 0.0, 0.3),
            Word::new("you", 0.4, 0.6),
            Word::new("know", 0.6, 0.9),
            Word::new("it", 1.0, 1.1).with_confidence(0.8),
            Word::new("works", 1.2, 1.6),
            Word::new("works", 1.7, 2.1),
        ])]);
        let decisions = detect(&transcript.words(), &Gazetteer::builtin("en"));
        (transcript, decisions)
    }

    #[test]
    fn test_labels_cover_phrase_words() {
        let (transcript, decisions) = sample();
        let report = Report::build(&transcript, &decisions);
        let labels: Vec<&str> = report.words.iter().map(|w| w.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["filler", "filler", "filler", "keep", "keep", "repetition"]
        );
        assert_eq!(report.summary.fillers_count, 3);
        assert_eq!(report.summary.total_words, 6);
        assert_eq!(report.summary.total_segments, 1);
    }

    #[test]
    fn test_json_shape() {
        let (transcript, decisions) = sample();
        let json = Report::build(&transcript, &decisions).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["fillers_count"], 3);
        assert_eq!(value["fillers"][1]["text"], "you know");
        assert_eq!(value["words"][3]["confidence"], 0.8);
        assert!(value["summary"]["generated_at"].is_string());
        assert_eq!(value["segments"][0]["words"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_csv_quoting() {
        let (transcript, decisions) = sample();
        let csv = Report::build(&transcript, &decisions).to_csv();
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(lines[0], "text,start,end,confidence,label");
        assert_eq!(lines[1], "\"Well,\",0,0.3,1,filler");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn test_text_listing() {
        let (transcript, decisions) = sample();
        let text = Report::build(&transcript, &decisions).to_text();
        assert!(text.contains("0.400 - 0.600: you [filler]"));
        assert!(text.contains("1.000 - 1.100: it\n"));
        assert!(text.contains("Fillers to remove: 3"));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ReportFormat::from_path(Path::new("r.JSON")), ReportFormat::Json);
        assert_eq!(ReportFormat::from_path(Path::new("r.csv")), ReportFormat::Csv);
        assert_eq!(ReportFormat::from_path(Path::new("r.txt")), ReportFormat::Text);
        assert_eq!(ReportFormat::from_path(Path::new("report")), ReportFormat::Text);
    }

    #[tokio::test]
    async fn test_save_creates_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("episode.csv");
        let (transcript, decisions) = sample();
        Report::build(&transcript, &decisions).save(&path).await.unwrap();
        let body = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(body.starts_with("text,start,end,confidence,label"));
    }
}
