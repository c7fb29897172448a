/// Validator integration tests — fixtures, configs, and scoring properties.

use lexiloop::core::config::QualityConfig;
use lexiloop::core::coverage::vocabulary_coverage;
use lexiloop::core::validator::ContentValidator;
use lexiloop::schema::score::QualityIssue;
use std::path::Path;

const VOCAB: [&str; 4] = ["adventure", "mysterious", "explore", "discover"];

fn fixture(name: &str) -> String {
    std::fs::read_to_string(Path::new("tests/fixtures").join(name)).unwrap()
}

#[test]
fn explorer_story_accepted_with_defaults() {
    let text = fixture("explorer_story.txt");
    let breakdown = ContentValidator::default().score(&text, &VOCAB);

    assert_eq!(breakdown.vocabulary_coverage, 1.0);
    assert_eq!(breakdown.grammar, 1.0);
    assert!(breakdown.is_valid);
    assert!(breakdown.composite >= 0.70);
    assert!((breakdown.composite - 0.8834).abs() < 1e-3, "got {}", breakdown.composite);
}

#[test]
fn sloppy_story_rejected() {
    let text = fixture("sloppy_story.txt");
    let breakdown = ContentValidator::default().score(&text, &["fox", "hunter", "river"]);

    assert!(!breakdown.is_valid);
    assert_eq!(breakdown.grammar, 0.0);
    assert_eq!(breakdown.coherence, 0.3);
    assert!(breakdown.has_issue(&QualityIssue::GrammarIssues));
    assert!(breakdown.has_issue(&QualityIssue::PoorCoherence));
    assert_eq!(
        breakdown.issue_tags()[0],
        "Low vocabulary coverage: 0.67"
    );
}

#[test]
fn strict_config_from_ron_rejects_explorer_story() {
    let config = QualityConfig::load_from_ron(Path::new("tests/fixtures/strict_quality.ron")).unwrap();
    assert!(config.coherence.whole_word_markers);
    assert_eq!(config.thresholds.max_issues, 0);
    // untouched sections keep their defaults
    assert_eq!(config.thresholds.min_chars, 100);

    let text = fixture("explorer_story.txt");
    let breakdown = ContentValidator::new(config).score(&text, &VOCAB);
    assert!(!breakdown.is_valid);
    assert!(breakdown.has_issue(&QualityIssue::PoorCoherence));
}

#[test]
fn short_text_always_flagged() {
    let validator = ContentValidator::default();
    for text in ["", "short text", "A tiny story. It ends fast. The end."] {
        let breakdown = validator.score(text, &["adventure"]);
        assert!(breakdown.has_issue(&QualityIssue::TooShort), "{:?}", text);
        assert!(!breakdown.has_issue(&QualityIssue::TooLong));
    }
}

#[test]
fn long_text_always_flagged() {
    let validator = ContentValidator::default();
    let text = fixture("explorer_story.txt").trim().repeat(4);
    assert!(text.chars().count() > 1500);
    let breakdown = validator.score(&text, &VOCAB);
    assert!(breakdown.has_issue(&QualityIssue::TooLong));
}

#[test]
fn scores_stay_in_unit_interval() {
    let validator = ContentValidator::default();
    let samples = [
        String::new(),
        "!!!???...".to_string(),
        "a".repeat(3000),
        fixture("explorer_story.txt"),
        fixture("sloppy_story.txt"),
        "Ünïcödé wörds. Ärger über alles! Ça va?".to_string(),
        "word ".repeat(400),
    ];
    for text in &samples {
        let b = validator.score(text, &VOCAB);
        for score in [b.vocabulary_coverage, b.readability, b.coherence, b.grammar, b.composite] {
            assert!((0.0..=1.0).contains(&score), "{} out of range for {:?}", score, text);
        }
        if b.is_valid {
            assert!(b.composite >= 0.70);
        }
    }
}

#[test]
fn full_coverage_when_every_word_appears() {
    let vocab = ["moon", "river", "lantern"];
    let text = "A lantern glowed. The river ran under the moon.";
    assert_eq!(vocabulary_coverage(text, &vocab), 1.0);
}

#[test]
fn validator_is_shareable_across_threads() {
    let validator = ContentValidator::default();
    let text = fixture("explorer_story.txt");
    let expected = validator.validate(&text, &VOCAB);

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| validator.validate(&text, &VOCAB)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

fn long_explorer_story() -> String {
    let text = fixture("explorer_story.txt");
    vec![text.trim(); 4].join(" ")
}

#[test]
fn two_issues_still_accepted_with_defaults() {
    let text = long_explorer_story();
    let breakdown =
        ContentValidator::default().score(&text, &["adventure", "mysterious", "explore", "zebra"]);

    assert_eq!(breakdown.issues.len(), 2);
    assert!(breakdown.has_issue(&QualityIssue::TooLong));
    assert_eq!(breakdown.vocabulary_coverage, 0.75);
    assert!((breakdown.composite - 0.8084).abs() < 1e-3, "got {}", breakdown.composite);
    assert!(breakdown.is_valid);
}

#[test]
fn third_issue_rejects_despite_passing_composite() {
    let text = long_explorer_story()
        .replace("She wanted", "she wanted")
        .replace("As she", "as she");
    let breakdown =
        ContentValidator::default().score(&text, &["adventure", "mysterious", "explore", "zebra"]);

    assert_eq!(breakdown.issues.len(), 3);
    assert!(breakdown.has_issue(&QualityIssue::GrammarIssues));
    assert_eq!(breakdown.grammar, 0.5);
    assert!(breakdown.composite >= 0.70, "got {}", breakdown.composite);
    assert!(!breakdown.is_valid);
}
