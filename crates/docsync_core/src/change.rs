/// Thresholds that decide when a length difference is "meaningful".
///
/// A change is significant when either threshold is met, so long documents with a
/// small relative but large absolute edit are caught as well as short documents
/// with a small absolute but large relative edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeThresholds {
    /// Minimum absolute length difference, in characters.
    pub min_content_change_chars: usize,
    /// Minimum relative length difference, in `[0, 1]`.
    pub min_significant_change_ratio: f64,
}

impl Default for ChangeThresholds {
    fn default() -> Self {
        Self {
            min_content_change_chars: 50,
            min_significant_change_ratio: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeAssessment {
    pub changed: bool,
    /// Normalized length difference in `[0, 1]`.
    pub change_ratio: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    thresholds: ChangeThresholds,
}

impl ChangeDetector {
    pub fn new(thresholds: ChangeThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> ChangeThresholds {
        self.thresholds
    }

    /// Compare two content snapshots by length.
    ///
    /// Whitespace-only content counts as empty.
    pub fn assess(&self, old_content: &str, new_content: &str) -> ChangeAssessment {
        let old_empty = old_content.trim().is_empty();
        let new_empty = new_content.trim().is_empty();

        match (old_empty, new_empty) {
            (true, true) => {
                return ChangeAssessment {
                    changed: false,
                    change_ratio: 0.0,
                    rationale: "both empty".to_string(),
                }
            }
            (true, false) | (false, true) => {
                return ChangeAssessment {
                    changed: true,
                    change_ratio: 1.0,
                    rationale: "one side empty".to_string(),
                }
            }
            (false, false) => {}
        }

        let old_len = old_content.chars().count();
        let new_len = new_content.chars().count();
        let length_diff = old_len.abs_diff(new_len);
        let max_len = old_len.max(new_len);
        let change_ratio = length_diff as f64 / max_len as f64;

        let changed = change_ratio >= self.thresholds.min_significant_change_ratio
            || length_diff >= self.thresholds.min_content_change_chars;

        ChangeAssessment {
            changed,
            change_ratio,
            rationale: format!("length diff: {length_diff}, ratio: {change_ratio:.3}"),
        }
    }

    /// Decide whether the content behind `output_id` must be rewritten.
    ///
    /// A missing or different hash always wins. With equal hashes the content
    /// snapshots, when both are present and non-empty, get a second look through
    /// [`ChangeDetector::assess`]; this catches a persisted file that drifted from
    /// the hash recorded for it.
    pub fn decide(
        &self,
        output_id: &str,
        old_hash: &str,
        new_hash: &str,
        old_content: Option<&str>,
        new_content: Option<&str>,
    ) -> UpdateDecision {
        if old_hash.is_empty() {
            return UpdateDecision::new(true, format!("{output_id}: no prior hash"));
        }
        if old_hash != new_hash {
            return UpdateDecision::new(true, format!("{output_id}: hash changed"));
        }

        match (old_content, new_content) {
            (Some(old), Some(new)) if !old.is_empty() && !new.is_empty() => {
                let assessment = self.assess(old, new);
                UpdateDecision::new(
                    assessment.changed,
                    format!(
                        "{output_id}: hash unchanged, content check ({})",
                        assessment.rationale
                    ),
                )
            }
            _ => UpdateDecision::new(false, format!("{output_id}: hash unchanged")),
        }
    }

    pub fn should_update(
        &self,
        output_id: &str,
        old_hash: &str,
        new_hash: &str,
        old_content: Option<&str>,
        new_content: Option<&str>,
    ) -> bool {
        self.decide(output_id, old_hash, new_hash, old_content, new_content)
            .update
    }
}

/// Outcome of [`ChangeDetector::decide`], with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDecision {
    pub update: bool,
    pub rationale: String,
}

impl UpdateDecision {
    fn new(update: bool, rationale: String) -> Self {
        Self { update, rationale }
    }
}
