/// Vocabulary coverage — how many target words made it into the text.

use crate::core::text::contains_word;

/// Fraction of `vocabulary` found in `text` as whole words, ignoring case.
///
/// Each vocabulary entry counts at most once no matter how often it
/// occurs. An empty vocabulary scores 1.0.
pub fn vocabulary_coverage<S: AsRef<str>>(text: &str, vocabulary: &[S]) -> f64 {
    if vocabulary.is_empty() {
        return 1.0;
    }

    let found = vocabulary
        .iter()
        .filter(|word| contains_word(text, word.as_ref()))
        .count();

    found as f64 / vocabulary.len() as f64
}
