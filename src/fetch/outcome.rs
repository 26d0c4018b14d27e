//! Result of one fetch attempt.

use std::path::{Path, PathBuf};

use super::error::FetchError;

/// Failure taxonomy carried by [`FetchStatus::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCategory {
    /// Malformed or non-HTTP(S) URL.
    InvalidInput,
    /// Timeout, DNS, connection refused, TLS, or an interrupted body.
    Network,
    /// Non-2xx response status.
    Http(u16),
    /// Content type or size rejected by the validation policy.
    Validation,
    /// Directory creation, scan, or write failed.
    Filesystem,
}

impl FailureCategory {
    /// Returns a stable label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid input",
            Self::Network => "network",
            Self::Http(_) => "http",
            Self::Validation => "validation",
            Self::Filesystem => "filesystem",
        }
    }
}

/// Terminal status of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStatus {
    /// The image was written to disk.
    Success,
    /// Identical content already exists; nothing was written.
    Skipped,
    /// The fetch failed; nothing was written.
    Failed(FailureCategory),
}

/// Immutable outcome of a single [`ImageFetcher::fetch`](super::ImageFetcher::fetch) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    url: String,
    status: FetchStatus,
    path: Option<PathBuf>,
    bytes: Option<u64>,
    message: String,
}

impl FetchOutcome {
    /// Outcome for an image saved at `path`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn saved(url: impl Into<String>, path: PathBuf, bytes: u64) -> Self {
        let kb = bytes as f64 / 1024.0;
        let message = format!(
            "saved {} ({kb:.1}KB, {bytes} bytes)",
            display_name(&path)
        );
        Self {
            url: url.into(),
            status: FetchStatus::Success,
            path: Some(path),
            bytes: Some(bytes),
            message,
        }
    }

    /// Outcome for content identical to the file already at `existing`.
    #[must_use]
    pub fn duplicate(url: impl Into<String>, existing: PathBuf, bytes: u64) -> Self {
        let message = format!(
            "duplicate of existing file {}; nothing written",
            display_name(&existing)
        );
        Self {
            url: url.into(),
            status: FetchStatus::Skipped,
            path: Some(existing),
            bytes: Some(bytes),
            message,
        }
    }

    /// Outcome for a failed fetch; the message is the error's display text.
    #[must_use]
    pub fn failed(url: impl Into<String>, error: &FetchError) -> Self {
        Self {
            url: url.into(),
            status: FetchStatus::Failed(error.category()),
            path: None,
            bytes: None,
            message: error.to_string(),
        }
    }

    /// The URL as supplied by the caller.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn status(&self) -> FetchStatus {
        self.status
    }

    /// Saved path for [`FetchStatus::Success`], existing path for [`FetchStatus::Skipped`].
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Payload size in bytes, when a body was received.
    #[must_use]
    pub fn bytes(&self) -> Option<u64> {
        self.bytes
    }

    /// Human-readable description of what happened.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.status == FetchStatus::Skipped
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.status, FetchStatus::Failed(_))
    }

    /// Failure category, if the fetch failed.
    #[must_use]
    pub fn failure(&self) -> Option<FailureCategory> {
        match self.status {
            FetchStatus::Failed(category) => Some(category),
            FetchStatus::Success | FetchStatus::Skipped => None,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
