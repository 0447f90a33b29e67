use crate::ItemOutcome;

/// Aggregate counters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub new: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl RunStats {
    pub fn record(&mut self, outcome: ItemOutcome) {
        self.processed += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        match outcome {
            ItemOutcome::New => self.new += 1,
            ItemOutcome::Updated => self.updated += 1,
            ItemOutcome::Unchanged => self.unchanged += 1,
            ItemOutcome::FetchFailed | ItemOutcome::SaveFailed => {}
        }
    }

    pub fn has_meaningful_changes(&self) -> bool {
        self.new > 0 || self.updated > 0
    }

    /// A batch only counts as failed when nothing succeeded and something failed.
    pub fn is_total_failure(&self) -> bool {
        self.succeeded == 0 && self.failed > 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_total_failure() {
            1
        } else {
            0
        }
    }
}
