//! Token normalization shared by every gazetteer lookup.

/// Trailing punctuation stripped from tokens before comparison.
pub const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ':', ';'];

/// Normalize a token for comparison.
///
/// Lowercases, trims surrounding whitespace and strips trailing punctuation
/// from [`TRAILING_PUNCTUATION`]. Whitespace exposed by stripping punctuation
/// is stripped too, so `normalize_token(normalize_token(x)) == normalize_token(x)`.
pub fn normalize_token(text: &str) -> String {
    text.to_lowercase()
        .trim_start()
        .trim_end_matches(|c: char| c.is_whitespace() || TRAILING_PUNCTUATION.contains(&c))
        .to_string()
}
