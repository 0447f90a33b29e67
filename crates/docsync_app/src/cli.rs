//! Command-line surface of `docsync`.
//!
//! Every flag has a default, so a bare `docsync` mirrors the built-in SDK
//! page list into `./docs`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use docsync_core::ManifestLabels;
use docsync_engine::{CrawlSettings, RetryPolicy, SyncConfig, TransformSettings};

use crate::sources::{CRAWL_ENTRY_POINTS, DOCS_ORIGIN};

const HEADING: &str = "Workato SDK Documentation";
const MANIFEST_DESCRIPTION: &str = "Workato SDK documentation manifest";

#[derive(Parser, Clone, Debug)]
#[command(name = "docsync")]
#[command(version)]
#[command(about = "Mirror SDK documentation pages as Markdown with an incremental manifest", long_about = None)]
pub struct Cli {
    /// Directory receiving the Markdown files and the manifest
    #[arg(long, env = "DOCSYNC_OUTPUT_DIR", default_value = "docs")]
    pub output_dir: PathBuf,

    /// File with one source URL per line (`#` starts a comment)
    #[arg(long, value_name = "FILE")]
    pub sources: Option<PathBuf>,

    /// Discover pages by crawling instead of using a source list
    #[arg(long)]
    pub crawl: bool,

    /// Pause between requests, in seconds
    #[arg(long, default_value_t = 1.0)]
    pub rate_limit_secs: f64,

    /// Retries per page after the first attempt
    #[arg(long, default_value_t = 3)]
    pub max_retries: u32,

    /// Repository the mirror is published from; only affects manifest labels
    #[arg(long, env = "GITHUB_REPOSITORY", default_value = "kreitter/workato-sdk-docs")]
    pub github_repository: String,

    /// Git ref the mirror is published at; only affects manifest labels
    #[arg(long, env = "GITHUB_REF_NAME", default_value = "main")]
    pub github_ref: String,

    /// Also write the log to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> Result<SyncConfig> {
        let Ok(rate_limit_delay) = Duration::try_from_secs_f64(self.rate_limit_secs) else {
            bail!(
                "--rate-limit-secs must be a non-negative number, got {}",
                self.rate_limit_secs
            );
        };

        let mut config = SyncConfig::default_with_output(self.output_dir.clone());
        config.rate_limit_delay = rate_limit_delay;
        config.retry = RetryPolicy {
            max_retries: self.max_retries,
            ..RetryPolicy::default()
        };
        config.transform = TransformSettings {
            heading: Some(HEADING.to_string()),
        };
        config.crawl = CrawlSettings {
            entry_points: CRAWL_ENTRY_POINTS.iter().map(|url| url.to_string()).collect(),
            allowed_origin: Some(DOCS_ORIGIN.to_string()),
            ..CrawlSettings::default()
        };
        config.labels = ManifestLabels::for_repository(
            &self.github_repository,
            &self.github_ref,
            MANIFEST_DESCRIPTION,
            DOCS_ORIGIN,
        );
        Ok(config)
    }
}
