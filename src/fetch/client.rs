//! HTTP client wrapper for fetching images.
//!
//! This module provides the `HttpClient` struct which issues the optional HEAD
//! probe and the GET, maps transport failures onto [`FetchError`], and reads
//! response bodies into memory under a byte ceiling.

use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::HeaderMap;
use tracing::{debug, instrument};
use url::Url;

use super::error::{FetchError, Rejection};
use super::validator::declared_length;
use crate::user_agent;

/// Largest up-front buffer reservation based on a declared `Content-Length`.
const MAX_PREALLOCATION: u64 = 8 * 1024 * 1024;

/// HTTP client shared by every fetch of one [`ImageFetcher`](super::ImageFetcher).
///
/// Created once and reused, taking advantage of connection pooling.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client whose connect and total request time are both bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialised.
    pub(crate) fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = build_client(timeout)?;
        Ok(Self { client, timeout })
    }

    /// Issues a HEAD request and returns its headers when the server answers 2xx.
    ///
    /// Any transport error or non-success status yields `None`: the probe is an
    /// optimisation and the caller proceeds with the GET.
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub(crate) async fn probe(&self, url: &Url) -> Option<HeaderMap> {
        match self.client.head(url.clone()).send().await {
            Ok(response) if response.status().is_success() => Some(response.headers().clone()),
            Ok(response) => {
                debug!(status = response.status().as_u16(), "HEAD not usable, skipping probe");
                None
            }
            Err(e) => {
                debug!(error = %e, "HEAD failed, skipping probe");
                None
            }
        }
    }

    /// Sends the GET and rejects non-2xx statuses without reading the body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Timeout`], [`FetchError::Network`] or
    /// [`FetchError::HttpStatus`].
    #[instrument(level = "debug", skip(self), fields(url = %url))]
    pub(crate) async fn get(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url.as_str(), status.as_u16()));
        }
        Ok(response)
    }

    /// Streams the body into memory, aborting once it grows past `max_bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::TooLarge`] wrapped in [`FetchError::Rejected`] when
    /// the ceiling is crossed, or a transport error if the stream breaks.
    pub(crate) async fn read_body(
        &self,
        url: &Url,
        response: reqwest::Response,
        max_bytes: u64,
    ) -> Result<Vec<u8>, FetchError> {
        let reserve = declared_length(response.headers())
            .unwrap_or(0)
            .min(max_bytes)
            .min(MAX_PREALLOCATION);
        let mut body = Vec::with_capacity(usize::try_from(reserve).unwrap_or(0));
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| self.map_transport_error(url, e))?;
            let total = body.len() as u64 + chunk.len() as u64;
            if total > max_bytes {
                debug!(received = total, limit = max_bytes, "body exceeded size ceiling");
                return Err(FetchError::rejected(
                    url.as_str(),
                    Rejection::TooLarge { limit: max_bytes },
                ));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body)
    }

    fn map_transport_error(&self, url: &Url, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::timeout(url.as_str(), self.timeout.as_secs())
        } else {
            FetchError::network(url.as_str(), error)
        }
    }
}

fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .gzip(true)
        .user_agent(user_agent::default_fetch_user_agent())
        .build()
}
