/// Readability — sentence length, syllable density and complex-word ratio.

use crate::core::config::ReadabilityConfig;
use crate::core::syllable::count_syllables;
use crate::core::text::split_sentences;

/// Raw counts gathered from a text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReadabilityStats {
    pub sentences: usize,
    pub words: usize,
    pub syllables: usize,
    pub complex_words: usize,
}

impl ReadabilityStats {
    pub fn collect(text: &str, config: &ReadabilityConfig) -> ReadabilityStats {
        let sentences = split_sentences(text);
        let mut stats = ReadabilityStats {
            sentences: sentences.len(),
            ..Default::default()
        };

        for sentence in sentences {
            for word in sentence.split_whitespace() {
                let syllables = count_syllables(word);
                stats.words += 1;
                stats.syllables += syllables;
                if syllables > config.complex_syllable_threshold
                    && !config.common_words.contains(&word.to_lowercase())
                {
                    stats.complex_words += 1;
                }
            }
        }

        stats
    }
}

/// Score readability in [0, 1]; 0 for text without sentences.
///
/// Averages three sub-scores, each degrading linearly with distance
/// from its ideal: sentence length, syllables per word, and the share
/// of non-complex words.
pub fn readability_score(text: &str, config: &ReadabilityConfig) -> f64 {
    let stats = ReadabilityStats::collect(text, config);
    if stats.sentences == 0 || stats.words == 0 {
        return 0.0;
    }

    let avg_sentence_length = stats.words as f64 / stats.sentences as f64;
    let avg_syllables = stats.syllables as f64 / stats.words as f64;
    let complex_ratio = stats.complex_words as f64 / stats.words as f64;

    let sentence_score = closeness(avg_sentence_length, config.ideal_sentence_length);
    let syllable_score = closeness(avg_syllables, config.ideal_syllables_per_word);
    let complexity_score = (1.0 - complex_ratio).max(0.0);

    ((sentence_score + syllable_score + complexity_score) / 3.0).min(1.0)
}

/// 1.0 at `ideal`, falling to 0.0 at a distance of `ideal` either side.
fn closeness(value: f64, ideal: f64) -> f64 {
    (1.0 - (value - ideal).abs() / ideal).max(0.0)
}
