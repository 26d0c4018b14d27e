//! Fetch orchestration for a single URL.
//!
//! [`ImageFetcher::fetch`] runs the whole pipeline (probe, GET, validation,
//! body read, duplicate check, filename resolution, write) and folds every
//! failure into a [`FetchOutcome`]. Nothing leaves this boundary as an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use reqwest::header::HeaderMap;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::client::HttpClient;
use super::config::FetcherConfig;
use super::constants::MAX_CREATE_ATTEMPTS;
use super::duplicate::find_duplicate;
use super::error::FetchError;
use super::filename::resolve_filename;
use super::outcome::FetchOutcome;
use super::validator::{ImageFormat, validate, validate_probe};

/// Fetches images into one destination directory.
///
/// Create once per run and reuse for every URL so the HTTP connection pool is
/// shared.
///
/// # Example
///
/// ```no_run
/// use image_fetcher_core::{FetcherConfig, ImageFetcher};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = ImageFetcher::new(FetcherConfig::new("./Fetched_Images"))?;
/// let outcome = fetcher.fetch("https://example.com/photo.jpg").await;
/// println!("{}", outcome.message());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: HttpClient,
    config: FetcherConfig,
}

impl ImageFetcher {
    /// Creates a fetcher with an HTTP client built from `config.policy.timeout`.
    ///
    /// # Errors
    ///
    /// Returns the reqwest builder error if the HTTP client cannot be built.
    #[instrument(level = "debug", skip(config), fields(output_dir = %config.output_dir.display()))]
    pub fn new(config: FetcherConfig) -> Result<Self, reqwest::Error> {
        let client = HttpClient::new(config.policy.timeout)?;
        debug!(
            max_bytes = config.policy.max_bytes,
            timeout_secs = config.policy.timeout.as_secs(),
            probe = config.probe_headers,
            "creating image fetcher"
        );
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Destination directory for saved images.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Creates the destination directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Io`] if the directory cannot be created.
    pub async fn ensure_output_dir(&self) -> Result<(), FetchError> {
        tokio::fs::create_dir_all(self.output_dir())
            .await
            .map_err(|e| FetchError::io(self.output_dir(), e))
    }

    /// Fetches one image and reports what happened.
    ///
    /// Writes at most one file. Never panics or returns an error; failures are
    /// described by [`FetchOutcome::failure`] and [`FetchOutcome::message`].
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let url = url.trim();
        match self.try_fetch(url).await {
            Ok(outcome) => {
                info!(status = ?outcome.status(), "{}", outcome.message());
                outcome
            }
            Err(error) => {
                warn!(error = %error, "fetch failed");
                FetchOutcome::failed(url, &error)
            }
        }
    }

    async fn try_fetch(&self, raw_url: &str) -> Result<FetchOutcome, FetchError> {
        let url = parse_fetch_url(raw_url)?;
        let policy = &self.config.policy;

        let mut probed = None;
        if self.config.probe_headers
            && let Some(headers) = self.client.probe(&url).await
        {
            probed = validate_probe(&headers, policy)
                .map_err(|reason| FetchError::rejected(url.as_str(), reason))?;
        }

        let response = self.client.get(&url).await?;
        let format = validate(response.headers(), policy)
            .map_err(|reason| FetchError::rejected(url.as_str(), reason))?;
        if let Some(probed) = probed
            && probed != format
        {
            debug!(
                head = probed.mime(),
                get = format.mime(),
                "HEAD and GET disagree on content type, using GET"
            );
        }
        let headers = response.headers().clone();
        let body = self.client.read_body(&url, response, policy.max_bytes).await?;
        let bytes = body.len() as u64;
        debug!(bytes, format = format.mime(), "body received");

        self.ensure_output_dir().await?;

        if let Some(existing) = find_duplicate(&body, self.output_dir()).await? {
            return Ok(FetchOutcome::duplicate(raw_url, existing, bytes));
        }

        let path = self.write_new_file(&url, &headers, format, &body).await?;
        Ok(FetchOutcome::saved(raw_url, path, bytes))
    }

    /// Writes `body` under a freshly resolved name, never replacing an existing file.
    async fn write_new_file(
        &self,
        url: &Url,
        headers: &HeaderMap,
        format: ImageFormat,
        body: &[u8],
    ) -> Result<PathBuf, FetchError> {
        let dir = self.output_dir();

        for _ in 0..MAX_CREATE_ATTEMPTS {
            let filename = resolve_filename(url, headers, format, dir);
            let path = dir.join(&filename);

            let file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(path = %path.display(), "name taken after resolution, resolving again");
                    continue;
                }
                Err(e) => return Err(FetchError::io(path, e)),
            };

            write_or_remove(file, &path, body).await?;
            return Ok(path);
        }

        Err(FetchError::io(
            dir,
            std::io::Error::new(ErrorKind::AlreadyExists, "no unused filename available"),
        ))
    }
}

/// Writes `body` into the freshly created `file`, removing `path` if the write fails.
async fn write_or_remove<W>(mut file: W, path: &Path, body: &[u8]) -> Result<(), FetchError>
where
    W: AsyncWrite + Unpin,
{
    let write_result = match file.write_all(body).await {
        Ok(()) => file.flush().await,
        Err(e) => Err(e),
    };
    drop(file);

    if let Err(e) = write_result {
        debug!(path = %path.display(), "cleaning up partial file after error");
        let _ = tokio::fs::remove_file(path).await;
        return Err(FetchError::io(path, e));
    }
    Ok(())
}

/// Parses `raw` as an absolute `http`/`https` URL with a host.
fn parse_fetch_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw).map_err(|_| FetchError::invalid_url(raw))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
        return Err(FetchError::invalid_url(raw));
    }
    Ok(url)
}
