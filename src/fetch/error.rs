//! Error types for the fetch module.
//!
//! [`FetchError`] carries the context of a failed step inside the pipeline.
//! It never leaves [`ImageFetcher::fetch`](super::ImageFetcher::fetch): the
//! orchestrator folds it into a [`FetchOutcome`](super::FetchOutcome).

use std::path::PathBuf;

use thiserror::Error;

use super::outcome::FailureCategory;

/// Errors that can occur while fetching and saving one image.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The input is not an absolute HTTP/HTTPS URL.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
    },

    /// Request did not complete within the configured timeout.
    #[error("connection error: timed out after {timeout_secs}s fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
        /// The configured timeout in whole seconds.
        timeout_secs: u64,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("connection error: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-2xx status.
    #[error("server returned {status} for {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Headers or body failed the validation policy.
    #[error("{reason}")]
    Rejected {
        /// The URL whose response was rejected.
        url: String,
        /// Why the response was rejected.
        reason: Rejection,
    },

    /// File system error (directory creation, scan, or write).
    #[error("filesystem error at {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Reasons the content validator refuses a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Response carried no `Content-Type` header.
    #[error("missing content type")]
    MissingContentType,

    /// `Content-Type` is not on the image allow-list.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// `Content-Length` announces more bytes than the ceiling allows.
    #[error("declared size exceeds limit ({declared} > {limit} bytes)")]
    DeclaredSizeExceedsLimit {
        /// Value of the `Content-Length` header.
        declared: u64,
        /// Configured ceiling.
        limit: u64,
    },

    /// Body grew past the ceiling while streaming.
    #[error("file too large (more than {limit} bytes)")]
    TooLarge {
        /// Configured ceiling.
        limit: u64,
    },
}

impl FetchError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            url: url.into(),
            timeout_secs,
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a validation error.
    pub fn rejected(url: impl Into<String>, reason: Rejection) -> Self {
        Self::Rejected {
            url: url.into(),
            reason,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Maps the error onto the outcome taxonomy.
    #[must_use]
    pub fn category(&self) -> FailureCategory {
        match self {
            Self::InvalidUrl { .. } => FailureCategory::InvalidInput,
            Self::Timeout { .. } | Self::Network { .. } => FailureCategory::Network,
            Self::HttpStatus { status, .. } => FailureCategory::Http(*status),
            Self::Rejected { .. } => FailureCategory::Validation,
            Self::Io { .. } => FailureCategory::Filesystem,
        }
    }
}

// Note on From trait implementations: there is no `From<reqwest::Error>` or
// `From<std::io::Error>`. Every variant requires context (url, path) the source
// errors don't provide, so callers go through the helper constructors.
