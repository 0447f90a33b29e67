use std::fmt;

/// Lifecycle of one source item within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemState {
    #[default]
    Pending,
    Fetching,
    Fetched,
    FetchFailed,
    Comparing,
    New,
    Updated,
    Unchanged,
    SaveFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEvent {
    FetchStarted,
    FetchSucceeded,
    FetchFailed,
    CompareStarted,
    /// Content was written; `had_prior` is true when the manifest already held a hash.
    Persisted { had_prior: bool },
    Skipped,
    SaveFailed,
}

/// Final classification of an item, used for run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    New,
    Updated,
    Unchanged,
    FetchFailed,
    SaveFailed,
}

impl ItemOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::New | Self::Updated | Self::Unchanged)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::FetchFailed => "fetch_failed",
            Self::SaveFailed => "save_failed",
        }
    }
}

impl ItemState {
    pub fn is_terminal(self) -> bool {
        self.outcome().is_some()
    }

    pub fn outcome(self) -> Option<ItemOutcome> {
        match self {
            Self::New => Some(ItemOutcome::New),
            Self::Updated => Some(ItemOutcome::Updated),
            Self::Unchanged => Some(ItemOutcome::Unchanged),
            Self::FetchFailed => Some(ItemOutcome::FetchFailed),
            Self::SaveFailed => Some(ItemOutcome::SaveFailed),
            Self::Pending | Self::Fetching | Self::Fetched | Self::Comparing => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: ItemState,
    pub event: ItemEvent,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event {:?} not allowed in state {:?}", self.event, self.from)
    }
}

impl std::error::Error for InvalidTransition {}

/// Pure transition function: items only move forward.
pub fn advance(state: ItemState, event: ItemEvent) -> Result<ItemState, InvalidTransition> {
    use ItemEvent as E;
    use ItemState as S;

    let next = match (state, event) {
        (S::Pending, E::FetchStarted) => S::Fetching,
        (S::Fetching, E::FetchSucceeded) => S::Fetched,
        (S::Fetching, E::FetchFailed) => S::FetchFailed,
        (S::Fetched, E::CompareStarted) => S::Comparing,
        (S::Comparing, E::Persisted { had_prior: false }) => S::New,
        (S::Comparing, E::Persisted { had_prior: true }) => S::Updated,
        (S::Comparing, E::Skipped) => S::Unchanged,
        (S::Comparing, E::SaveFailed) => S::SaveFailed,
        (from, event) => return Err(InvalidTransition { from, event }),
    };
    Ok(next)
}
