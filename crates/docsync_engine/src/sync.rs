use std::path::PathBuf;
use std::time::{Duration, Instant};

use docsync_core::{
    advance, ChangeDetector, FetchMethod, ItemEvent, ItemState, Manifest, ManifestEntry,
    RunMetadata, RunStats,
};
use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use thiserror::Error;

use crate::config::{Clock, SyncConfig};
use crate::filename::OutputNaming;
use crate::manifest::{ManifestError, ManifestStore};
use crate::persist::{AtomicFileWriter, PersistError};
use crate::source::{ContentSource, DocumentSource};
use crate::{FailureCategory, FetchError};

const PROGRESS_EVERY: usize = 10;

/// Why a single item did not reach a successful terminal state.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl ItemError {
    pub fn category(&self) -> FailureCategory {
        match self {
            ItemError::Fetch(err) => err.category(),
            ItemError::Persist(err) => err.category(),
        }
    }
}

#[derive(Debug)]
pub struct ItemReport {
    pub source_id: String,
    pub output_id: String,
    pub state: ItemState,
    pub error: Option<ItemError>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub stats: RunStats,
    pub duration: Duration,
    /// Entries in the manifest after the run, carried-over ones included.
    pub total_files: usize,
    pub manifest_path: PathBuf,
    pub items: Vec<ItemReport>,
}

impl RunSummary {
    pub fn has_meaningful_changes(&self) -> bool {
        self.stats.has_meaningful_changes()
    }

    pub fn exit_code(&self) -> i32 {
        self.stats.exit_code()
    }
}

/// Drives a batch of source ids through fetch, compare and persist, then
/// writes the manifest once.
pub struct SyncOrchestrator<S = DocumentSource> {
    source: S,
    detector: ChangeDetector,
    writer: AtomicFileWriter,
    store: ManifestStore,
    naming: OutputNaming,
    rate_limit_delay: Duration,
    tool_version: String,
    clock: Clock,
}

impl SyncOrchestrator {
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(DocumentSource::from_config(config), config)
    }
}

impl<S: ContentSource> SyncOrchestrator<S> {
    pub fn new(source: S, config: &SyncConfig) -> Self {
        Self {
            source,
            detector: ChangeDetector::new(config.thresholds),
            writer: AtomicFileWriter::new(config.output_dir.clone()),
            store: ManifestStore::new(
                config.manifest_path(),
                config.labels.clone(),
                config.clock.clone(),
            ),
            naming: config.naming.clone(),
            rate_limit_delay: config.rate_limit_delay,
            tool_version: config.tool_version.clone(),
            clock: config.clock.clone(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn run(&self, source_ids: &[String]) -> Result<RunSummary, ManifestError> {
        self.run_with_method(source_ids, FetchMethod::HardcodedUrls).await
    }

    /// Process every source id in order. Item failures are recorded and the
    /// batch continues; only a failed manifest save aborts the run.
    pub async fn run_with_method(
        &self,
        source_ids: &[String],
        method: FetchMethod,
    ) -> Result<RunSummary, ManifestError> {
        let started = Instant::now();
        let mut manifest = self.store.load();
        let mut stats = RunStats::default();
        let mut items = Vec::with_capacity(source_ids.len());
        let total = source_ids.len();

        engine_info!("Starting sync of {} sources", total);

        for (index, source_id) in source_ids.iter().enumerate() {
            if index > 0 && !self.rate_limit_delay.is_zero() {
                tokio::time::sleep(self.rate_limit_delay).await;
            }

            let report = self.process_item(&mut manifest, source_id).await;
            if let Some(outcome) = report.state.outcome() {
                stats.record(outcome);
            }
            items.push(report);

            if (index + 1) % PROGRESS_EVERY == 0 || index + 1 == total {
                engine_info!(
                    "Progress: {}/{} processed ({} ok, {} failed)",
                    index + 1,
                    total,
                    stats.succeeded,
                    stats.failed
                );
            }
        }

        let duration = started.elapsed();
        let total_files = manifest.len();
        let metadata = RunMetadata::from_stats(
            &stats,
            total_files,
            duration.as_secs_f64(),
            (self.clock)(),
            self.tool_version.clone(),
            method,
        );
        let manifest_path = self.store.save(&mut manifest, Some(metadata))?;

        engine_info!(
            "Sync finished in {:.1}s: {} processed, {} new, {} updated, {} unchanged, {} failed",
            duration.as_secs_f64(),
            stats.processed,
            stats.new,
            stats.updated,
            stats.unchanged,
            stats.failed
        );
        if !stats.has_meaningful_changes() {
            engine_info!("No meaningful changes detected");
        }

        Ok(RunSummary {
            stats,
            duration,
            total_files,
            manifest_path,
            items,
        })
    }

    async fn process_item(&self, manifest: &mut Manifest, source_id: &str) -> ItemReport {
        let output_id = self.naming.output_id(source_id);
        let mut state = step(ItemState::Pending, ItemEvent::FetchStarted);

        let fetched = match self.source.fetch(source_id).await {
            Ok(fetched) => {
                state = step(state, ItemEvent::FetchSucceeded);
                fetched
            }
            Err(err) => {
                let err = ItemError::from(err);
                log_item_failure(source_id, &err);
                return ItemReport {
                    source_id: source_id.to_string(),
                    output_id,
                    state: step(state, ItemEvent::FetchFailed),
                    error: Some(err),
                };
            }
        };

        state = step(state, ItemEvent::CompareStarted);
        let prior_hash = manifest.prior_hash(&output_id).to_string();
        let old_content = self.writer.read_existing(&output_id);

        let decision = self.detector.decide(
            &output_id,
            &prior_hash,
            &fetched.content_hash,
            old_content.as_deref(),
            Some(fetched.content.as_str()),
        );
        engine_debug!("{}", decision.rationale);

        let mut error = None;
        if !decision.update {
            if let Some(entry) = manifest.files.get_mut(&output_id) {
                if entry.original_url.is_empty() {
                    entry.original_url = source_id.to_string();
                }
            }
            engine_debug!("Unchanged: {}", output_id);
            state = step(state, ItemEvent::Skipped);
        } else {
            match self.writer.write_document(&output_id, &fetched.content) {
                Ok(hash) => {
                    let had_prior = !prior_hash.is_empty();
                    manifest.record(
                        output_id.clone(),
                        ManifestEntry {
                            original_url: source_id.to_string(),
                            hash,
                            last_updated: (self.clock)(),
                        },
                    );
                    if had_prior {
                        engine_info!("UPDATED: {}", output_id);
                    } else {
                        engine_info!("NEW: {}", output_id);
                    }
                    state = step(state, ItemEvent::Persisted { had_prior });
                }
                Err(err) => {
                    let err = ItemError::from(err);
                    log_item_failure(source_id, &err);
                    state = step(state, ItemEvent::SaveFailed);
                    error = Some(err);
                }
            }
        }

        ItemReport {
            source_id: source_id.to_string(),
            output_id,
            state,
            error,
        }
    }
}

/// Forward-only transition; the orchestrator only ever issues legal events.
fn step(state: ItemState, event: ItemEvent) -> ItemState {
    match advance(state, event) {
        Ok(next) => next,
        Err(err) => {
            engine_error!("Item lifecycle: {}", err);
            debug_assert!(false, "{err}");
            state
        }
    }
}

fn log_item_failure(source_id: &str, err: &ItemError) {
    match err.category() {
        FailureCategory::Network | FailureCategory::Http(_) | FailureCategory::Content => {
            engine_warn!("Failed {} ({}): {}", source_id, err.category(), err);
        }
        FailureCategory::FileSystem | FailureCategory::Parsing => {
            engine_error!("Failed {} ({}): {}", source_id, err.category(), err);
        }
    }
}
