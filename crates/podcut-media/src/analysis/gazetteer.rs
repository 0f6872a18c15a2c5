//! Per-language filler tables.
//!
//! A [`Gazetteer`] is built once and never mutated afterwards. Share it
//! between concurrent detectors behind an `Arc`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::normalize::normalize_token;

const RU_FILLERS: &[&str] = &[
    // Hesitation sounds
    "э", "ээ", "эээ", "м", "мм", "ммм", "а", "аа", "ааа",
    // Discourse markers
    "ну", "вот", "типа", "значит", "короче", "вообще", "там", "так", "это", "ладно", "блин",
    "слушай", "смотри", "понимаешь", "знаешь", "видишь", "представляешь", "допустим",
    "наверное", "кстати", "прикинь",
];

const RU_PHRASES: &[&str] = &[
    "как бы",
    "ну вот",
    "вот так",
    "это самое",
    "так сказать",
    "в общем",
    "в принципе",
    "в смысле",
    "по сути",
    "на самом деле",
    "собственно говоря",
    "честно говоря",
    "грубо говоря",
    "короче говоря",
    "скажем так",
    "как говорится",
    "так называемый",
    "можно сказать",
    "ну типа",
    "ну короче",
    "ну это",
    "вот это",
];

const EN_FILLERS: &[&str] = &[
    "um", "uh", "hmm", "like", "you know", "so", "basically", "erm", "ah", "well", "right",
    "okay", "anyway",
];

const EN_PHRASES: &[&str] = &[
    "you know",
    "i mean",
    "kind of",
    "sort of",
    "you see",
    "to be honest",
    "basically speaking",
    "at the end of the day",
];

/// How overlapping phrase candidates are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhrasePriority {
    /// Longer phrases are matched first; declaration order breaks ties.
    #[default]
    LongestFirst,
    /// Phrases are matched strictly in declaration order.
    DeclarationOrder,
}

impl FromStr for PhrasePriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "longest" | "longest_first" | "longest-first" => Ok(Self::LongestFirst),
            "declaration" | "declaration_order" | "declaration-order" | "config" => {
                Ok(Self::DeclarationOrder)
            }
            other => Err(format!("unknown phrase priority '{}'", other)),
        }
    }
}

impl fmt::Display for PhrasePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhrasePriority::LongestFirst => f.write_str("longest"),
            PhrasePriority::DeclarationOrder => f.write_str("declaration"),
        }
    }
}

/// Immutable per-language filler configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Gazetteer {
    language: String,
    fillers: HashSet<String>,
    phrases: Vec<Vec<String>>,
    priority: PhrasePriority,
}

impl Gazetteer {
    /// Built-in tables for a language code (`ru`, `en`).
    ///
    /// Unknown codes produce an empty gazetteer: nothing is flagged as a
    /// filler, repetition detection still runs.
    pub fn builtin(language: &str) -> Self {
        Self::builder(language).build()
    }

    /// Start from the built-in tables for `language`.
    pub fn builder(language: &str) -> GazetteerBuilder {
        GazetteerBuilder::new(language)
    }

    /// A gazetteer with no fillers and no phrases.
    pub fn empty() -> Self {
        GazetteerBuilder::empty("").build()
    }

    /// Language code this gazetteer was built for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether a normalized token is a single-token filler.
    pub fn is_filler(&self, normalized: &str) -> bool {
        self.fillers.contains(normalized)
    }

    /// Phrases in matching order (already arranged by priority).
    pub fn phrases(&self) -> &[Vec<String>] {
        &self.phrases
    }

    /// Number of single-token fillers.
    pub fn filler_count(&self) -> usize {
        self.fillers.len()
    }

    /// Phrase priority used when this gazetteer was built.
    pub fn priority(&self) -> PhrasePriority {
        self.priority
    }
}

/// Builder for [`Gazetteer`]. All inputs are normalized on insert.
#[derive(Debug, Clone)]
pub struct GazetteerBuilder {
    language: String,
    fillers: HashSet<String>,
    phrases: Vec<Vec<String>>,
    priority: PhrasePriority,
}

impl GazetteerBuilder {
    /// Seed the builder with the built-in tables for `language`.
    pub fn new(language: &str) -> Self {
        let code = language.trim().to_lowercase();
        let (fillers, phrases): (&[&str], &[&str]) = match code.as_str() {
            "ru" => (RU_FILLERS, RU_PHRASES),
            "en" => (EN_FILLERS, EN_PHRASES),
            _ => {
                warn!(language = %code, "No built-in filler tables for language, using empty gazetteer");
                (&[], &[])
            }
        };

        let mut builder = Self::empty(&code);
        builder = builder.with_fillers(fillers.iter().copied());
        for phrase in phrases {
            builder = builder.with_phrase(phrase);
        }
        builder
    }

    /// A builder with no entries.
    pub fn empty(language: &str) -> Self {
        Self {
            language: language.to_string(),
            fillers: HashSet::new(),
            phrases: Vec::new(),
            priority: PhrasePriority::default(),
        }
    }

    /// Add extra single-token fillers.
    pub fn with_fillers<I, S>(mut self, fillers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fillers.extend(
            fillers
                .into_iter()
                .map(|f| normalize_token(f.as_ref()))
                .filter(|f| !f.is_empty()),
        );
        self
    }

    /// Append a multi-token phrase (whitespace separated).
    pub fn with_phrase(mut self, phrase: &str) -> Self {
        let tokens: Vec<String> = phrase
            .split_whitespace()
            .map(normalize_token)
            .filter(|t| !t.is_empty())
            .collect();
        if !tokens.is_empty() && !self.phrases.contains(&tokens) {
            self.phrases.push(tokens);
        }
        self
    }

    /// Set phrase priority.
    pub fn with_priority(mut self, priority: PhrasePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Freeze into an immutable gazetteer.
    pub fn build(self) -> Gazetteer {
        let mut phrases = self.phrases;
        if self.priority == PhrasePriority::LongestFirst {
            // Stable: equal lengths keep declaration order
            phrases.sort_by(|a, b| b.len().cmp(&a.len()));
        }
        Gazetteer {
            language: self.language,
            fillers: self.fillers,
            phrases,
            priority: self.priority,
        }
    }
}
