use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use docsync_core::{ChangeThresholds, ManifestLabels};

use crate::crawl::CrawlSettings;
use crate::filename::OutputNaming;
use crate::manifest::MANIFEST_FILENAME;
use crate::{FetchSettings, RetryPolicy, TransformSettings};

/// Source of ISO-8601 timestamps; injectable so tests are deterministic.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

pub fn utc_clock() -> Clock {
    Arc::new(|| Utc::now().to_rfc3339())
}

/// Plausibility limits applied to every fetched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLimits {
    /// Raw response bodies below this many bytes are rejected.
    pub min_raw_bytes: usize,
    /// Converted Markdown below this many characters (trimmed) is rejected.
    pub min_markdown_chars: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            min_raw_bytes: 100,
            min_markdown_chars: 50,
        }
    }
}

#[derive(Clone)]
pub struct SyncConfig {
    pub output_dir: PathBuf,
    pub manifest_filename: String,
    /// Pause before every request of a batch except the first.
    pub rate_limit_delay: Duration,
    pub fetch: FetchSettings,
    pub retry: RetryPolicy,
    pub limits: ContentLimits,
    pub thresholds: ChangeThresholds,
    pub naming: OutputNaming,
    pub transform: TransformSettings,
    pub crawl: CrawlSettings,
    pub labels: ManifestLabels,
    pub tool_version: String,
    pub clock: Clock,
}

impl SyncConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            manifest_filename: MANIFEST_FILENAME.to_string(),
            rate_limit_delay: Duration::from_secs_f64(1.0),
            fetch: FetchSettings::default(),
            retry: RetryPolicy::default(),
            limits: ContentLimits::default(),
            thresholds: ChangeThresholds::default(),
            naming: OutputNaming::default(),
            transform: TransformSettings::default(),
            crawl: CrawlSettings::default(),
            labels: ManifestLabels::default(),
            tool_version: "3.0".to_string(),
            clock: utc_clock(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(&self.manifest_filename)
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("output_dir", &self.output_dir)
            .field("manifest_filename", &self.manifest_filename)
            .field("rate_limit_delay", &self.rate_limit_delay)
            .field("fetch", &self.fetch)
            .field("retry", &self.retry)
            .field("limits", &self.limits)
            .field("thresholds", &self.thresholds)
            .field("naming", &self.naming)
            .field("transform", &self.transform)
            .field("crawl", &self.crawl)
            .field("labels", &self.labels)
            .field("tool_version", &self.tool_version)
            .finish_non_exhaustive()
    }
}
