//! Integration tests for batch fetching and summaries.

mod support;

use std::time::{Duration, Instant};

use image_fetcher_core::{BatchSummary, FailureCategory, FetchStatus, FetcherConfig, ImageFetcher};
use support::socket_guard::start_mock_server_or_skip;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn png(body: &[u8]) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "image/png")
        .set_body_bytes(body.to_vec())
}

#[tokio::test]
async fn test_fetch_all_preserves_order_when_middle_item_fails() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/one.png"))
        .respond_with(png(b"one"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/two.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/three.png"))
        .respond_with(png(b"three"))
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let fetcher = ImageFetcher::new(
        FetcherConfig::new(temp_dir.path()).with_request_delay(Duration::ZERO),
    )
    .unwrap();

    let urls: Vec<String> = ["one", "two", "three"]
        .iter()
        .map(|name| format!("{}/{name}.png", mock_server.uri()))
        .collect();
    let outcomes = fetcher.fetch_all(&urls).await;

    assert_eq!(outcomes.len(), 3);
    for (outcome, url) in outcomes.iter().zip(&urls) {
        assert_eq!(outcome.url(), url);
    }
    assert_eq!(outcomes[0].status(), FetchStatus::Success);
    assert_eq!(outcomes[1].status(), FetchStatus::Failed(FailureCategory::Http(404)));
    assert_eq!(outcomes[2].status(), FetchStatus::Success);

    let summary = BatchSummary::from_outcomes(&outcomes);
    assert_eq!((summary.succeeded, summary.skipped, summary.failed), (2, 0, 1));
    assert_eq!(summary.total(), 3);
    assert_eq!(
        summary.saved_paths,
        vec![temp_dir.path().join("one.png"), temp_dir.path().join("three.png")]
    );
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, urls[1]);
}

#[tokio::test]
async fn test_fetch_all_counts_duplicates_and_invalid_input() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/dup.png"))
        .respond_with(png(b"same bytes"))
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let fetcher = ImageFetcher::new(
        FetcherConfig::new(temp_dir.path()).with_request_delay(Duration::ZERO),
    )
    .unwrap();
    let url = format!("{}/dup.png", mock_server.uri());

    let outcomes = fetcher
        .fetch_all([url.as_str(), "ftp://example.com/a.png", url.as_str()])
        .await;
    let summary = BatchSummary::from_outcomes(&outcomes);

    assert_eq!((summary.succeeded, summary.skipped, summary.failed), (1, 1, 1));
    assert_eq!(outcomes[1].failure(), Some(FailureCategory::InvalidInput));
}

#[tokio::test]
async fn test_fetch_all_sleeps_between_requests_only() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let delay = Duration::from_millis(150);
    let fetcher = ImageFetcher::new(
        FetcherConfig::new(temp_dir.path())
            .with_request_delay(delay)
            .with_probe_headers(false),
    )
    .unwrap();
    let urls = [
        format!("{}/a.png", mock_server.uri()),
        format!("{}/b.png", mock_server.uri()),
        format!("{}/c.png", mock_server.uri()),
    ];

    let started = Instant::now();
    let outcomes = fetcher.fetch_all(&urls).await;
    let elapsed = started.elapsed();

    assert_eq!(outcomes.len(), 3);
    assert!(elapsed >= delay * 2, "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_fetch_all_empty_batch() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let fetcher = ImageFetcher::new(FetcherConfig::new(temp_dir.path())).unwrap();

    let outcomes = fetcher.fetch_all(Vec::<String>::new()).await;

    assert!(outcomes.is_empty());
    assert_eq!(BatchSummary::from_outcomes(&outcomes).total(), 0);
}
