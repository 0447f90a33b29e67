//! Docsync core: pure change-detection, item lifecycle and manifest model.
mod change;
mod item;
mod manifest;
mod stats;

pub use change::{ChangeAssessment, ChangeDetector, ChangeThresholds, UpdateDecision};
pub use item::{advance, InvalidTransition, ItemEvent, ItemOutcome, ItemState};
pub use manifest::{FetchMethod, Manifest, ManifestEntry, ManifestLabels, RunMetadata};
pub use stats::RunStats;
