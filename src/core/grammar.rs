/// Structural grammar heuristics — capitalization, punctuation, run-ons.

use crate::core::config::GrammarConfig;
use crate::core::text::{has_missing_space_after_punctuation, split_sentences};

/// Score sentence structure in [0, 1].
///
/// Starts at 1.0 and multiplies in each applicable penalty. Text with no
/// sentences at all scores 0.0.
pub fn grammar_score(text: &str, config: &GrammarConfig) -> f64 {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return 0.0;
    }

    let capitalized = sentences
        .iter()
        .filter(|s| s.chars().next().is_some_and(char::is_uppercase))
        .count();
    let mut score = capitalized as f64 / sentences.len() as f64;

    if !text.contains('.') {
        score *= config.no_period_penalty;
    }

    if has_missing_space_after_punctuation(text) {
        score *= config.missing_space_penalty;
    }

    let avg_words = text.split_whitespace().count() as f64 / sentences.len() as f64;
    if avg_words > config.run_on_words {
        score *= config.run_on_penalty;
    }

    score.max(0.0)
}
