//! Static configuration for the fetch pipeline.
//!
//! Both structs are plain values handed to [`ImageFetcher::new`](super::ImageFetcher::new);
//! nothing here reads process-wide state, so tests can shrink limits freely.

use std::path::PathBuf;
use std::time::Duration;

use super::constants::{DEFAULT_MAX_BYTES, DEFAULT_OUTPUT_DIR, DEFAULT_REQUEST_DELAY, DEFAULT_TIMEOUT};
use super::validator::ImageFormat;

/// Rules a response must satisfy before its body is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Accepted image formats.
    pub allowed: Vec<ImageFormat>,
    /// Maximum body size in bytes, enforced on the header and while streaming.
    pub max_bytes: u64,
    /// Timeout for each HTTP request (connect plus body).
    pub timeout: Duration,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allowed: ImageFormat::ALL.to_vec(),
            max_bytes: DEFAULT_MAX_BYTES,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ValidationPolicy {
    /// Returns true if `format` is on the allow-list.
    #[must_use]
    pub fn allows(&self, format: ImageFormat) -> bool {
        self.allowed.contains(&format)
    }
}

/// Configuration for an [`ImageFetcher`](super::ImageFetcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Directory images are written to; created if absent.
    pub output_dir: PathBuf,
    /// Content-type, size, and timeout rules.
    pub policy: ValidationPolicy,
    /// Pause between requests in batch mode.
    pub request_delay: Duration,
    /// Issue a HEAD request before the GET to reject obvious non-images early.
    pub probe_headers: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            policy: ValidationPolicy::default(),
            request_delay: DEFAULT_REQUEST_DELAY,
            probe_headers: true,
        }
    }
}

impl FetcherConfig {
    /// Default configuration writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.policy.max_bytes = max_bytes;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.policy.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    #[must_use]
    pub fn with_probe_headers(mut self, probe: bool) -> Self {
        self.probe_headers = probe;
        self
    }
}
