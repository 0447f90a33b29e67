//! `docsync`: mirror a documentation site into Markdown files plus a manifest.
mod cli;
mod sources;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use docsync_core::FetchMethod;
use docsync_engine::{Crawler, ReqwestFetcher, SyncConfig, SyncOrchestrator};
use engine_logging::{engine_error, engine_info, engine_warn, LogDestination};

use crate::cli::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    engine_logging::initialize(destination, cli.verbose);

    let config = cli.to_config()?;
    let configured = match &cli.sources {
        Some(path) => sources::load_source_file(path)?,
        None => sources::default_sources(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let code = runtime.block_on(sync(&config, configured, cli.crawl))?;
    Ok(ExitCode::from(code))
}

async fn sync(config: &SyncConfig, configured: Vec<String>, force_crawl: bool) -> Result<u8> {
    engine_info!("Syncing documentation into {}", config.output_dir.display());

    let (source_ids, method) = if force_crawl || configured.is_empty() {
        if !force_crawl {
            engine_warn!("No source pages configured, falling back to crawling");
        }
        let fetcher = ReqwestFetcher::new(config.fetch.clone());
        let discovered = Crawler::new(&fetcher, &config.crawl, config.rate_limit_delay)
            .discover()
            .await;
        engine_info!("Crawl discovered {} pages", discovered.len());
        (discovered, FetchMethod::Crawl)
    } else {
        (configured, FetchMethod::HardcodedUrls)
    };

    let orchestrator = SyncOrchestrator::from_config(config);
    let summary = orchestrator
        .run_with_method(&source_ids, method)
        .await
        .context("failed to save manifest")?;

    if summary.exit_code() != 0 {
        engine_error!(
            "All {} pages failed; see the log for per-page reasons",
            summary.stats.failed
        );
    } else {
        engine_info!(
            "Documentation sync complete: {} files tracked in {}",
            summary.total_files,
            summary.manifest_path.display()
        );
    }
    Ok(if summary.exit_code() == 0 { 0 } else { 1 })
}
