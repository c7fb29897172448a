use serde::{Deserialize, Serialize};
use std::fmt;

/// A problem detected while validating generated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QualityIssue {
    TooShort,
    TooLong,
    /// Carries the measured coverage.
    LowVocabularyCoverage(f64),
    PoorReadability,
    PoorCoherence,
    GrammarIssues,
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "Content too short"),
            Self::TooLong => write!(f, "Content too long"),
            Self::LowVocabularyCoverage(coverage) => {
                write!(f, "Low vocabulary coverage: {:.2}", coverage)
            }
            Self::PoorReadability => write!(f, "Poor readability"),
            Self::PoorCoherence => write!(f, "Poor coherence"),
            Self::GrammarIssues => write!(f, "Grammar issues detected"),
        }
    }
}

/// Per-metric scores, composite score, and the accept/reject decision.
///
/// Every score lies in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub vocabulary_coverage: f64,
    pub readability: f64,
    pub coherence: f64,
    pub grammar: f64,
    pub composite: f64,
    pub issues: Vec<QualityIssue>,
    pub is_valid: bool,
}

impl ScoreBreakdown {
    /// Issue tags rendered as human-readable strings.
    pub fn issue_tags(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.to_string()).collect()
    }

    pub fn has_issue(&self, issue: &QualityIssue) -> bool {
        self.issues.iter().any(|i| {
            std::mem::discriminant(i) == std::mem::discriminant(issue)
        })
    }
}
