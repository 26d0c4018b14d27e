//! Image Fetcher Core Library
//!
//! This library fetches images from HTTP(S) URLs into a local folder. Each
//! fetch validates that the response really is an image, refuses anything over
//! the size ceiling, skips payloads whose bytes are already saved, and picks a
//! filename that never overwrites an unrelated file.
//!
//! # Architecture
//!
//! - [`fetch`] - the fetch pipeline: orchestrator, content validator,
//!   filename resolver, duplicate detector and batch driver
//!
//! Every failure is reported as data on a [`FetchOutcome`]; nothing in the
//! fetch path returns an error to the caller.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod fetch;
mod user_agent;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use fetch::{
    BatchSummary, DEFAULT_MAX_BYTES, DEFAULT_OUTPUT_DIR, DEFAULT_REQUEST_DELAY, DEFAULT_TIMEOUT,
    FailureCategory, FetchError, FetchOutcome, FetchStatus, FetcherConfig, ImageFetcher,
    ImageFormat, Rejection, ValidationPolicy,
};
