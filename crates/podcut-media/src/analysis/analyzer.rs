//! Filler and repetition detection over a token timeline.
//!
//! Three passes share one [`ClaimSet`] so that no token is attributed to
//! more than one decision:
//!
//! ```text
//! tokens ──► phrases ──► single fillers ──► repetitions ──► sort by start
//!               │              │                 │
//!               └──────── ClaimSet (token index ranges) ─┘
//! ```

use std::ops::Range;
use std::sync::Arc;

use podcut_models::{EditDecision, EditReason, Segment, Word};
use tracing::{debug, trace};

use super::claims::ClaimSet;
use super::gazetteer::Gazetteer;
use super::normalize::normalize_token;
use crate::telemetry;

/// A match before it is turned into a decision.
#[derive(Debug, Clone)]
struct Match {
    tokens: Range<usize>,
    reason: EditReason,
}

/// Detects fillers and stutter repetitions in a transcript.
#[derive(Debug, Clone)]
pub struct Analyzer {
    gazetteer: Arc<Gazetteer>,
}

impl Analyzer {
    /// Create an analyzer over a gazetteer.
    pub fn new(gazetteer: Gazetteer) -> Self {
        Self {
            gazetteer: Arc::new(gazetteer),
        }
    }

    /// Create an analyzer sharing an existing gazetteer.
    pub fn with_shared(gazetteer: Arc<Gazetteer>) -> Self {
        Self { gazetteer }
    }

    /// Analyzer over the built-in tables for `language`.
    pub fn for_language(language: &str) -> Self {
        Self::new(Gazetteer::builtin(language))
    }

    /// The gazetteer in use.
    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Analyze segments by flattening them into one token timeline.
    pub fn analyze_segments(&self, segments: &[Segment]) -> Vec<EditDecision> {
        let words: Vec<Word> = segments
            .iter()
            .flat_map(|s| s.words.iter().cloned())
            .collect();
        self.analyze(&words)
    }

    /// Analyze a token timeline and return decisions sorted by start.
    pub fn analyze(&self, words: &[Word]) -> Vec<EditDecision> {
        let normalized: Vec<String> = words.iter().map(|w| normalize_token(&w.text)).collect();
        let mut claims = ClaimSet::new();
        let mut matches = Vec::new();

        self.match_phrases(&normalized, &mut claims, &mut matches);
        let phrase_count = matches.len();

        self.match_fillers(&normalized, &mut claims, &mut matches);
        let filler_count = matches.len() - phrase_count;

        match_repetitions(&normalized, &mut claims, &mut matches);
        let repetition_count = matches.len() - phrase_count - filler_count;

        debug_assert!(claims.is_disjoint());

        // Sort by start time; token order breaks ties between zero-length words
        matches.sort_by(|a, b| {
            words[a.tokens.start]
                .start
                .total_cmp(&words[b.tokens.start].start)
                .then(a.tokens.start.cmp(&b.tokens.start))
        });

        let decisions: Vec<EditDecision> = matches
            .into_iter()
            .map(|m| to_decision(words, m))
            .collect();

        debug!(
            language = %self.gazetteer.language(),
            tokens = words.len(),
            phrases = phrase_count,
            fillers = filler_count,
            repetitions = repetition_count,
            "Filler analysis complete"
        );
        telemetry::record_decisions(&decisions);

        decisions
    }

    fn match_phrases(&self, normalized: &[String], claims: &mut ClaimSet, out: &mut Vec<Match>) {
        for phrase in self.gazetteer.phrases() {
            let len = phrase.len();
            if len == 0 || len > normalized.len() {
                continue;
            }

            for start in 0..=normalized.len() - len {
                let window = start..start + len;
                if claims.overlaps(&window) {
                    continue;
                }
                if normalized[window.clone()] == phrase[..] {
                    trace!(start, phrase = %phrase.join(" "), "Phrase matched");
                    claims.claim(window.clone());
                    out.push(Match {
                        tokens: window,
                        reason: EditReason::Filler,
                    });
                }
            }
        }
    }

    fn match_fillers(&self, normalized: &[String], claims: &mut ClaimSet, out: &mut Vec<Match>) {
        for (i, token) in normalized.iter().enumerate() {
            if claims.contains(i) || !self.gazetteer.is_filler(token) {
                continue;
            }
            claims.claim(i..i + 1);
            out.push(Match {
                tokens: i..i + 1,
                reason: EditReason::Filler,
            });
        }
    }
}

/// Flag a token equal to its immediate predecessor.
///
/// The predecessor is compared whether or not it was claimed; single-character
/// tokens are never flagged. In a chain of identical tokens every token after
/// the first is flagged.
fn match_repetitions(normalized: &[String], claims: &mut ClaimSet, out: &mut Vec<Match>) {
    for i in 1..normalized.len() {
        if claims.contains(i) {
            continue;
        }
        let current = &normalized[i];
        if current == &normalized[i - 1] && current.chars().count() > 1 {
            claims.claim(i..i + 1);
            out.push(Match {
                tokens: i..i + 1,
                reason: EditReason::Repetition,
            });
        }
    }
}

fn to_decision(words: &[Word], m: Match) -> EditDecision {
    let covered = &words[m.tokens.clone()];
    let original_text = covered
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    EditDecision {
        start: covered[0].start,
        end: covered[covered.len() - 1].end,
        reason: m.reason,
        original_text,
    }
}

/// Detect fillers and repetitions in `words` using `gazetteer`.
pub fn detect(words: &[Word], gazetteer: &Gazetteer) -> Vec<EditDecision> {
    Analyzer::new(gazetteer.clone()).analyze(words)
}
