// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Page fetching against a local server

use search_shell::search::{ContentFetchConfig, FetchError, PageFetcher};
use std::time::Duration;

use super::support::{local_content_config, serve_pages};

#[tokio::test]
async fn test_fetch_article_title_and_main_content() {
    let base = serve_pages().await;
    let fetcher = PageFetcher::new(local_content_config()).unwrap();

    let doc = fetcher
        .fetch_for_content(&format!("{}/article", base))
        .await
        .unwrap();

    assert_eq!(doc.title(), "Paris Facts");
    let content = doc.main_content(2000);
    assert!(content.contains("Paris is the capital of France."));
    assert!(!content.contains("Home | About"));
    assert!(!content.contains("Copyright"));
    assert!(!content.contains("tracking"));
}

#[tokio::test]
async fn test_untitled_page_falls_back_to_url() {
    let base = serve_pages().await;
    let fetcher = PageFetcher::new(local_content_config()).unwrap();
    let url = format!("{}/untitled", base);

    let doc = fetcher.fetch_for_title(&url).await.unwrap();
    assert_eq!(doc.title(), url);
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let base = serve_pages().await;
    let fetcher = PageFetcher::new(local_content_config()).unwrap();

    let result = fetcher
        .fetch(&format!("{}/slow", base), Duration::from_millis(200))
        .await;
    assert!(matches!(result, Err(FetchError::Timeout(_))));
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let base = serve_pages().await;
    let fetcher = PageFetcher::new(local_content_config()).unwrap();

    let result = fetcher.fetch_for_content(&format!("{}/missing", base)).await;
    assert!(matches!(result, Err(FetchError::HttpStatus(404, _))));
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let base = serve_pages().await;
    let fetcher = PageFetcher::new(local_content_config()).unwrap();

    let doc = fetcher
        .fetch_for_content(&format!("{}/moved", base))
        .await
        .unwrap();
    assert_eq!(doc.title(), "Paris Facts");
}

#[tokio::test]
async fn test_localhost_blocked_by_default() {
    let base = serve_pages().await;
    let fetcher = PageFetcher::new(ContentFetchConfig::default()).unwrap();

    let result = fetcher.fetch_for_content(&format!("{}/article", base)).await;
    assert!(matches!(result, Err(FetchError::UnsafeUrl(_))));
}

#[tokio::test]
async fn test_malformed_url_is_rejected() {
    let fetcher = PageFetcher::new(local_content_config()).unwrap();
    let result = fetcher.fetch_for_content("not a url").await;
    assert!(matches!(result, Err(FetchError::UnsafeUrl(_))));
}
