//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Fetch images from URLs into a local folder.
///
/// Each URL is checked for an image content type and a size ceiling, compared
/// by content against the images already saved, and written under a name that
/// never overwrites an existing file.
#[derive(Parser, Debug)]
#[command(name = "image-fetcher")]
#[command(author, version, about)]
pub struct Args {
    /// Image URLs to fetch. When omitted, URLs are read from stdin (one per line),
    /// or prompted for interactively.
    pub urls: Vec<String>,

    /// Directory images are saved to [default: Fetched_Images]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum image size in megabytes (1-1024) [default: 50]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=1024))]
    pub max_size_mb: Option<u64>,

    /// Network timeout per request in seconds (1-300) [default: 10]
    #[arg(short = 't', long = "timeout", value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout_secs: Option<u64>,

    /// Delay between requests in batch mode, in milliseconds (0-60000) [default: 500]
    #[arg(short = 'd', long, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub delay_ms: Option<u64>,

    /// Skip the HEAD request issued before each download
    #[arg(long)]
    pub no_probe: bool,

    /// Path to a config.toml (defaults to $XDG_CONFIG_HOME/image-fetcher/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    pub quiet: bool,
}
