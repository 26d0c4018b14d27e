//! Image fetch pipeline.
//!
//! This module downloads images from HTTP/HTTPS URLs into a local directory.
//!
//! # Features
//!
//! - Optional HEAD probe to reject non-images before downloading
//! - Content-type allow-list and size ceiling (declared and streamed)
//! - Duplicate detection by MD5 against the files already in the directory
//! - Filenames from the URL, `Content-Disposition`, or a generated substitute,
//!   with `name(1).ext` disambiguation
//! - Sequential batch mode with a politeness delay and a derived summary
//!
//! # Example
//!
//! ```no_run
//! use image_fetcher_core::{BatchSummary, FetcherConfig, ImageFetcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = ImageFetcher::new(FetcherConfig::default())?;
//! let outcomes = fetcher
//!     .fetch_all(["https://example.com/a.png", "https://example.com/b.jpg"])
//!     .await;
//! let summary = BatchSummary::from_outcomes(&outcomes);
//! println!("saved {}, skipped {}, failed {}", summary.succeeded, summary.skipped, summary.failed);
//! # Ok(())
//! # }
//! ```

mod batch;
mod client;
mod config;
mod constants;
pub mod duplicate;
mod error;
mod fetcher;
pub mod filename;
mod outcome;
pub mod validator;

pub use batch::BatchSummary;
pub use config::{FetcherConfig, ValidationPolicy};
pub use constants::{DEFAULT_MAX_BYTES, DEFAULT_OUTPUT_DIR, DEFAULT_REQUEST_DELAY, DEFAULT_TIMEOUT};
pub use duplicate::{ContentHash, DirectoryHashIndex, find_duplicate};
pub use error::{FetchError, Rejection};
pub use fetcher::ImageFetcher;
pub use filename::resolve_filename;
pub use outcome::{FailureCategory, FetchOutcome, FetchStatus};
pub use validator::{ImageFormat, validate, validate_probe};
