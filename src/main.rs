//! CLI entry point for the image fetcher.

use anyhow::{Context, Result};
use clap::Parser;
use image_fetcher_core::{BatchSummary, ImageFetcher};
use tracing::{debug, info, warn};

mod app_config;
mod cli;
mod input;
mod output;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let loaded = app_config::load_config(args.config.as_deref())?;
    if loaded.config.is_some() {
        debug!(path = ?loaded.path, "loaded config file");
    }
    let config = app_config::build_fetcher_config(&args, loaded.config.as_ref());

    let urls = input::collect_urls(&args.urls)?;
    if urls.is_empty() {
        output::print_no_input_guidance();
        return Ok(());
    }

    let fetcher = ImageFetcher::new(config).context("Failed to build HTTP client")?;
    // Each fetch reports its own filesystem failure if this did not work.
    if let Err(error) = fetcher.ensure_output_dir().await {
        warn!(error = %error, "could not create output directory");
    }

    info!(urls = urls.len(), output_dir = %fetcher.output_dir().display(), "Image fetcher starting");

    let outcomes = fetcher.fetch_all(&urls).await;
    let summary = BatchSummary::from_outcomes(&outcomes);

    output::print_outcomes(&outcomes);
    output::print_summary(&summary, fetcher.output_dir());

    info!(
        saved = summary.succeeded,
        skipped = summary.skipped,
        failed = summary.failed,
        "Fetch complete"
    );

    Ok(())
}
