//! Batch driver: sequential fetches with a politeness delay, plus a summary
//! derived from the outcomes.

use std::path::PathBuf;

use tracing::{info, instrument};

use super::fetcher::ImageFetcher;
use super::outcome::{FetchOutcome, FetchStatus};

impl ImageFetcher {
    /// Fetches every URL in order, one at a time.
    ///
    /// Returns exactly one outcome per input, in input order. Individual
    /// failures never stop the batch. The configured request delay is slept
    /// between requests, not after the last one.
    #[instrument(skip(self, urls))]
    pub async fn fetch_all<I, S>(&self, urls: I) -> Vec<FetchOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<S> = urls.into_iter().collect();
        let total = urls.len();
        let delay = self.config().request_delay;
        let mut outcomes = Vec::with_capacity(total);

        for (index, url) in urls.iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            info!(item = index + 1, total, url = url.as_ref(), "fetching");
            outcomes.push(self.fetch(url.as_ref()).await);
        }

        outcomes
    }
}

/// Counts and details derived from a batch of outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Images written to disk.
    pub succeeded: usize,
    /// Duplicates skipped.
    pub skipped: usize,
    /// Failed fetches.
    pub failed: usize,
    /// Paths of the images written, in batch order.
    pub saved_paths: Vec<PathBuf>,
    /// `(url, message)` for each failure, in batch order.
    pub failures: Vec<(String, String)>,
}

impl BatchSummary {
    #[must_use]
    pub fn from_outcomes(outcomes: &[FetchOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome.status() {
                FetchStatus::Success => {
                    summary.succeeded += 1;
                    if let Some(path) = outcome.path() {
                        summary.saved_paths.push(path.to_path_buf());
                    }
                }
                FetchStatus::Skipped => summary.skipped += 1,
                FetchStatus::Failed(_) => {
                    summary.failed += 1;
                    summary
                        .failures
                        .push((outcome.url().to_string(), outcome.message().to_string()));
                }
            }
        }
        summary
    }

    /// Number of outcomes summarised.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}
