/// Coherence — a surface heuristic rewarding cohesion markers.
///
/// This does not model discourse; it only checks that transition words,
/// pronouns, and connectors show up somewhere in the text.

use rustc_hash::FxHashSet;

use crate::core::config::{CoherenceConfig, MarkerGroup};
use crate::core::text::{contains_word, split_sentences};

/// Score coherence in [0, 1].
///
/// Texts with fewer than `min_sentences` sentences get the fixed
/// `short_text_score`. Otherwise each marker group adds its bonus per
/// distinct marker present, up to the group's cap, on top of the base.
pub fn coherence_score(text: &str, config: &CoherenceConfig) -> f64 {
    if split_sentences(text).len() < config.min_sentences {
        return config.short_text_score;
    }

    let lower = text.to_lowercase();
    let score = config.base_score
        + group_bonus(&lower, &config.transitions, config.whole_word_markers)
        + group_bonus(&lower, &config.pronouns, config.whole_word_markers)
        + group_bonus(&lower, &config.connectors, config.whole_word_markers);

    score.clamp(0.0, 1.0)
}

fn group_bonus(lower_text: &str, group: &MarkerGroup, whole_word: bool) -> f64 {
    let markers: FxHashSet<String> = group
        .words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();

    let present = markers
        .iter()
        .filter(|marker| {
            if whole_word {
                contains_word(lower_text, marker)
            } else {
                lower_text.contains(marker.as_str())
            }
        })
        .count();

    (present as f64 * group.bonus).min(group.cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_gets_fixed_low_score() {
        let config = CoherenceConfig::default();
        assert_eq!(coherence_score("One. Two.", &config), 0.3);
        assert_eq!(coherence_score("", &config), 0.3);
    }

    #[test]
    fn base_score_without_markers() {
        let config = CoherenceConfig::default();
        assert_eq!(coherence_score("Cat. Dog. Cow.", &config), 0.5);
    }

    #[test]
    fn markers_are_counted_once() {
        let config = CoherenceConfig::default();
        // "however" twice counts once: 0.5 + 0.05
        let score = coherence_score("However. However. Yes.", &config);
        assert!((score - 0.55).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn transition_bonus_is_capped() {
        let config = CoherenceConfig {
            whole_word_markers: true,
            ..CoherenceConfig::default()
        };
        let text = "However x. Therefore x. Meanwhile x. Finally x. Later x.";
        // five transitions would add 0.25, capped at 0.20
        assert!((coherence_score(text, &config) - 0.70).abs() < 1e-9);
    }

    #[test]
    fn substring_matching_by_default() {
        let config = CoherenceConfig::default();
        // "sand" contains "and"
        let score = coherence_score("Sand. Rock. Stone.", &config);
        assert!((score - 0.53).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn whole_word_matching_is_stricter() {
        let config = CoherenceConfig {
            whole_word_markers: true,
            ..CoherenceConfig::default()
        };
        assert_eq!(coherence_score("Sand. Rock. Stone.", &config), 0.5);
    }

    #[test]
    fn score_never_exceeds_one() {
        let config = CoherenceConfig {
            base_score: 0.9,
            ..CoherenceConfig::default()
        };
        let text = "First he ran and she hid. Then they met, but it rained. \
                    However, this was fine because those days were long.";
        assert_eq!(coherence_score(text, &config), 1.0);
    }
}
