/// Shared text utilities — sentence splitting and word matching.

use regex::Regex;
use std::sync::LazyLock;

/// Characters that end a sentence.
pub const SENTENCE_ENDERS: &[char] = &['.', '!', '?'];

/// Sentence-ending punctuation glued directly to a letter ("end.Next").
static MISSING_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?][a-zA-Z]").expect("valid regex"));

/// Split text into sentences on runs of `.`, `!`, `?`.
///
/// Fragments are trimmed and empty ones discarded, so `"Hi!! There."`
/// yields `["Hi", "There"]`.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(SENTENCE_ENDERS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Case-insensitive, word-boundary anchored search for `needle` in `haystack`.
///
/// Returns `false` for an empty needle or a pattern that fails to compile.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    let pattern = format!(r"(?i)\b{}\b", regex::escape(needle));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(haystack),
        Err(e) => {
            tracing::debug!("word pattern for '{}' rejected: {}", needle, e);
            false
        }
    }
}

/// True when any sentence ender is immediately followed by an ASCII letter.
pub fn has_missing_space_after_punctuation(text: &str) -> bool {
    MISSING_SPACE_RE.is_match(text)
}
