use docsync_core::{ChangeDetector, ChangeThresholds, UpdateDecision};
use pretty_assertions::assert_eq;

fn init_logging() {
    engine_logging::initialize_for_tests();
}

#[test]
fn default_thresholds_match_documented_values() {
    let thresholds = ChangeDetector::default().thresholds();
    assert_eq!(thresholds.min_content_change_chars, 50);
    assert_eq!(thresholds.min_significant_change_ratio, 0.1);
}

#[test]
fn both_empty_is_unchanged_with_zero_ratio() {
    let detector = ChangeDetector::default();
    for (old, new) in [("", ""), ("   ", "\n\t"), ("", "  ")] {
        let assessment = detector.assess(old, new);
        assert!(!assessment.changed, "{old:?} -> {new:?}");
        assert_eq!(assessment.change_ratio, 0.0);
        assert!(assessment.rationale.contains("both empty"));
    }
}

#[test]
fn one_side_empty_is_maximal_change() {
    let detector = ChangeDetector::default();
    for (old, new) in [("", "new content"), ("old content", ""), ("  \n", "x")] {
        let assessment = detector.assess(old, new);
        assert!(assessment.changed, "{old:?} -> {new:?}");
        assert_eq!(assessment.change_ratio, 1.0);
        assert!(assessment.rationale.contains("one side empty"));
    }
}

#[test]
fn same_length_edit_is_not_significant() {
    let detector = ChangeDetector::default();
    let old = "This is a long piece of content with many words and sentences.";
    let new = "This is a long piece of content with many words and sentences!";
    let assessment = detector.assess(old, new);
    assert!(!assessment.changed);
    assert_eq!(assessment.change_ratio, 0.0);
}

#[test]
fn relative_threshold_catches_short_documents() {
    let detector = ChangeDetector::default();
    // 1 char on 8 is 12.5%, well below the absolute threshold.
    let assessment = detector.assess("Content", "Content!");
    assert!(assessment.changed);
    assert_eq!(assessment.change_ratio, 1.0 / 8.0);
}

#[test]
fn absolute_threshold_catches_long_documents() {
    let detector = ChangeDetector::default();
    let old = "a".repeat(10_000);
    let new = "a".repeat(10_060);
    let assessment = detector.assess(&old, &new);
    assert!(assessment.change_ratio < 0.1);
    assert!(assessment.changed);
}

#[test]
fn ratio_uses_longer_side_as_denominator() {
    let detector = ChangeDetector::default();
    let assessment = detector.assess(&"A".repeat(100), &"B".repeat(200));
    assert!(assessment.changed);
    assert_eq!(assessment.change_ratio, 0.5);
}

#[test]
fn lengths_are_counted_in_characters() {
    let detector = ChangeDetector::default();
    // Same char count, different byte count.
    let assessment = detector.assess("cafe au lait", "café au lait");
    assert_eq!(assessment.change_ratio, 0.0);
    assert!(!assessment.changed);
}

#[test]
fn custom_thresholds_are_honoured() {
    let detector = ChangeDetector::new(ChangeThresholds {
        min_content_change_chars: 10,
        min_significant_change_ratio: 0.5,
    });
    let assessment = detector.assess(&"A".repeat(20), &"B".repeat(35));
    assert!(assessment.changed);
    assert_eq!(assessment.change_ratio, 15.0 / 35.0);

    let assessment = detector.assess(&"A".repeat(20), &"B".repeat(25));
    assert!(!assessment.changed);
}

#[test]
fn hash_mismatch_or_missing_prior_hash_always_updates() {
    init_logging();
    let detector = ChangeDetector::default();
    assert!(detector.should_update("test.md", "", "new_hash", None, None));
    assert!(detector.should_update("test.md", "old_hash", "new_hash", None, None));
    // Identical content does not veto a hash mismatch.
    assert!(detector.should_update(
        "test.md",
        "old_hash",
        "new_hash",
        Some("same"),
        Some("same")
    ));
}

#[test]
fn equal_hashes_without_content_trust_the_hash() {
    init_logging();
    let detector = ChangeDetector::default();
    assert!(!detector.should_update("test.md", "same_hash", "same_hash", None, None));
    assert!(!detector.should_update("test.md", "same_hash", "same_hash", Some("old"), None));
    assert!(!detector.should_update("test.md", "same_hash", "same_hash", Some(""), Some("new")));
}

#[test]
fn equal_hashes_with_content_fall_back_to_assessment() {
    init_logging();
    let detector = ChangeDetector::default();
    assert!(detector.should_update(
        "test.md",
        "same_hash",
        "same_hash",
        Some("Original content"),
        Some("Modified content with significant changes"),
    ));
    assert!(!detector.should_update(
        "test.md",
        "same_hash",
        "same_hash",
        Some("This is a long piece of content"),
        Some("This is a long piece of content."),
    ));
}

#[test]
fn decision_carries_its_reason() {
    let detector = ChangeDetector::default();
    assert_eq!(
        detector.decide("cli.md", "", "h", None, None),
        UpdateDecision {
            update: true,
            rationale: "cli.md: no prior hash".to_string(),
        }
    );
    assert_eq!(
        detector.decide("cli.md", "h1", "h2", None, None).rationale,
        "cli.md: hash changed"
    );
    let drifted = detector.decide("cli.md", "h", "h", Some("stub"), Some(&"x".repeat(80)));
    assert!(drifted.update);
    assert!(drifted.rationale.starts_with("cli.md: hash unchanged, content check (length diff: 76"));
    assert!(!detector.decide("cli.md", "h", "h", None, None).update);
}
