//! Lexical filler and repetition detection.
//!
//! Turns a word-level token timeline into an ordered, non-overlapping list
//! of [`EditDecision`](podcut_models::EditDecision)s.
//!
//! # Usage
//!
//! ```rust
//! use podcut_media::analysis::{Analyzer, Gazetteer};
//! use podcut_models::Word;
//!
//! let words = vec![
//!     Word::new("э", 0.0, 0.2),
//!     Word::new("привет", 0.3, 0.8),
//!     Word::new("привет", 0.9, 1.4),
//! ];
//! let analyzer = Analyzer::new(Gazetteer::builtin("ru"));
//! let decisions = analyzer.analyze(&words);
//! assert_eq!(decisions.len(), 2);
//! ```

mod analyzer;
mod claims;
mod gazetteer;
mod normalize;

pub use analyzer::{detect, Analyzer};
pub use claims::ClaimSet;
pub use gazetteer::{Gazetteer, GazetteerBuilder, PhrasePriority};
pub use normalize::{normalize_token, TRAILING_PUNCTUATION};
