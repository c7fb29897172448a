/// Tunable constants for scoring and generation, loadable from RON.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Weights of the four sub-scores in the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub vocabulary: f64,
    pub readability: f64,
    pub coherence: f64,
    pub grammar: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            vocabulary: 0.30,
            readability: 0.25,
            coherence: 0.25,
            grammar: 0.20,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.vocabulary + self.readability + self.coherence + self.grammar
    }
}

/// Acceptance threshold and per-metric issue thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum composite score for a story to be accepted.
    pub min_composite: f64,
    pub min_vocabulary_coverage: f64,
    pub min_readability: f64,
    pub min_coherence: f64,
    pub min_grammar: f64,
    /// More issues than this rejects the text regardless of score.
    pub max_issues: usize,
    /// Trimmed character count bounds.
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_composite: 0.70,
            min_vocabulary_coverage: 0.8,
            min_readability: 0.5,
            min_coherence: 0.6,
            min_grammar: 0.7,
            max_issues: 2,
            min_chars: 100,
            max_chars: 1500,
        }
    }
}

/// Readability ideals and the common-word exemption list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilityConfig {
    pub ideal_sentence_length: f64,
    pub ideal_syllables_per_word: f64,
    /// Tokens with more syllables than this count as complex.
    pub complex_syllable_threshold: usize,
    pub common_words: FxHashSet<String>,
}

impl Default for ReadabilityConfig {
    fn default() -> Self {
        Self {
            ideal_sentence_length: 15.0,
            ideal_syllables_per_word: 2.0,
            complex_syllable_threshold: 2,
            common_words: to_set(COMMON_WORDS),
        }
    }
}

/// A list of cohesion markers with its per-marker bonus and total cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerGroup {
    pub words: Vec<String>,
    pub bonus: f64,
    pub cap: f64,
}

impl MarkerGroup {
    fn new(words: &[&str], bonus: f64, cap: f64) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            bonus,
            cap,
        }
    }
}

/// Cohesion-marker heuristic parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoherenceConfig {
    pub base_score: f64,
    /// Returned when the text has fewer than `min_sentences` sentences.
    pub short_text_score: f64,
    pub min_sentences: usize,
    pub transitions: MarkerGroup,
    pub pronouns: MarkerGroup,
    pub connectors: MarkerGroup,
    /// Match markers as whole words instead of anywhere in the text.
    pub whole_word_markers: bool,
}

impl Default for CoherenceConfig {
    fn default() -> Self {
        Self {
            base_score: 0.5,
            short_text_score: 0.3,
            min_sentences: 3,
            transitions: MarkerGroup::new(TRANSITIONS, 0.05, 0.20),
            pronouns: MarkerGroup::new(PRONOUNS, 0.02, 0.15),
            connectors: MarkerGroup::new(CONNECTORS, 0.03, 0.15),
            whole_word_markers: false,
        }
    }
}

/// Structural grammar penalties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    pub no_period_penalty: f64,
    pub missing_space_penalty: f64,
    pub run_on_penalty: f64,
    /// Average words per sentence above which run-ons are suspected.
    pub run_on_words: f64,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            no_period_penalty: 0.8,
            missing_space_penalty: 0.9,
            run_on_penalty: 0.8,
            run_on_words: 30.0,
        }
    }
}

/// Everything the quality validator needs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub weights: ScoreWeights,
    pub thresholds: Thresholds,
    pub readability: ReadabilityConfig,
    pub coherence: CoherenceConfig,
    pub grammar: GrammarConfig,
}

impl QualityConfig {
    /// Load a quality config from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<QualityConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a quality config from a RON string. Missing fields take defaults.
    pub fn parse_ron(input: &str) -> Result<QualityConfig, ConfigError> {
        let config: QualityConfig = ron::from_str(input)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        if [w.vocabulary, w.readability, w.coherence, w.grammar]
            .iter()
            .any(|v| !(0.0..=1.0).contains(v))
        {
            return Err(ConfigError::Invalid(
                "score weights must lie in [0, 1]".to_string(),
            ));
        }
        if (w.total() - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Invalid(format!(
                "score weights must sum to 1.0, got {:.3}",
                w.total()
            )));
        }
        if self.readability.ideal_sentence_length <= 0.0
            || self.readability.ideal_syllables_per_word <= 0.0
        {
            return Err(ConfigError::Invalid(
                "readability ideals must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Orchestration settings for the story pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Generation attempts before giving up on a rejected story.
    pub max_attempts: u32,
    /// Cache time-to-live in seconds.
    pub cache_ttl_secs: u64,
    pub max_vocabulary: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            cache_ttl_secs: 24 * 60 * 60,
            max_vocabulary: 20,
        }
    }
}

impl PipelineConfig {
    pub fn load_from_ron(path: &Path) -> Result<PipelineConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<PipelineConfig, ConfigError> {
        let config: PipelineConfig = ron::from_str(input)?;
        if config.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn to_set(words: &[&str]) -> FxHashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

const TRANSITIONS: &[&str] = &[
    "however", "therefore", "meanwhile", "then", "next", "finally", "first", "second",
    "later", "after", "before",
];

const PRONOUNS: &[&str] = &["he", "she", "it", "they", "this", "that", "these", "those"];

const CONNECTORS: &[&str] = &[
    "and", "but", "or", "so", "because", "since", "although", "while",
];

/// Frequent English words exempt from the complex-word count.
const COMMON_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not",
    "on", "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from",
    "they", "she", "her", "or", "an", "will", "my", "one", "all", "would", "there",
    "their", "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me",
    "when", "make", "can", "like", "time", "no", "just", "him", "know", "take", "people",
    "into", "year", "your", "good", "some", "could", "them", "see", "other", "than",
    "then", "now", "look", "only", "come", "its", "over", "think", "also", "back",
    "after", "use", "two", "how", "our", "work", "first", "well", "way", "even", "new",
    "want", "because", "any", "these", "give", "day", "most", "us",
];
