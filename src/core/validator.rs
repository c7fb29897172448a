/// Quality validation — runs every scorer and decides accept/reject.

use crate::core::coherence::coherence_score;
use crate::core::config::QualityConfig;
use crate::core::coverage::vocabulary_coverage;
use crate::core::grammar::grammar_score;
use crate::core::readability::readability_score;
use crate::schema::score::{QualityIssue, ScoreBreakdown};

/// Composite heuristic scorer for generated stories.
///
/// Stateless apart from its configuration; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ContentValidator {
    config: QualityConfig,
}

impl ContentValidator {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Accept/reject decision and composite score.
    pub fn validate<S: AsRef<str>>(&self, text: &str, vocabulary: &[S]) -> (bool, f64) {
        let breakdown = self.score(text, vocabulary);
        (breakdown.is_valid, breakdown.composite)
    }

    /// Full per-metric breakdown with detected issues.
    pub fn score<S: AsRef<str>>(&self, text: &str, vocabulary: &[S]) -> ScoreBreakdown {
        let config = &self.config;
        let thresholds = &config.thresholds;
        let mut issues = Vec::new();

        let length = text.trim().chars().count();
        if length < thresholds.min_chars {
            issues.push(QualityIssue::TooShort);
        }
        if length > thresholds.max_chars {
            issues.push(QualityIssue::TooLong);
        }

        let vocabulary_coverage = unit(vocabulary_coverage(text, vocabulary));
        if vocabulary_coverage < thresholds.min_vocabulary_coverage {
            issues.push(QualityIssue::LowVocabularyCoverage(vocabulary_coverage));
        }

        let readability = unit(readability_score(text, &config.readability));
        if readability < thresholds.min_readability {
            issues.push(QualityIssue::PoorReadability);
        }

        let coherence = unit(coherence_score(text, &config.coherence));
        if coherence < thresholds.min_coherence {
            issues.push(QualityIssue::PoorCoherence);
        }

        let grammar = unit(grammar_score(text, &config.grammar));
        if grammar < thresholds.min_grammar {
            issues.push(QualityIssue::GrammarIssues);
        }

        let weights = &config.weights;
        let composite = unit(
            vocabulary_coverage * weights.vocabulary
                + readability * weights.readability
                + coherence * weights.coherence
                + grammar * weights.grammar,
        );

        let is_valid =
            composite >= thresholds.min_composite && issues.len() <= thresholds.max_issues;

        tracing::debug!(
            vocabulary_coverage,
            readability,
            coherence,
            grammar,
            composite,
            issues = issues.len(),
            is_valid,
            "scored text"
        );

        ScoreBreakdown {
            vocabulary_coverage,
            readability,
            coherence,
            grammar,
            composite,
            issues,
            is_valid,
        }
    }
}

/// Clamp to [0, 1]; non-finite values degrade to the minimum.
fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
