// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Context construction: search, fetch, extract and format

use axum::http::{header, HeaderMap};
use axum::response::Html;
use axum::routing::post;
use axum::Router;
use search_shell::config::AppConfig;
use search_shell::context::{ContextBuilder, NO_CONTENT_MARKER};
use search_shell::pipeline::http_client;
use search_shell::search::duckduckgo::DuckDuckGoProvider;
use search_shell::search::{
    ContentFetchConfig, PageFetcher, SearchConfig, SearchProvider, SearchService,
    DEFAULT_USER_AGENT,
};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::support::{context_builder, local_content_config, serve, serve_pages};

#[tokio::test]
async fn test_failed_page_keeps_url_and_order() {
    let base = serve_pages().await;
    let slow = format!("{}/slow", base);
    let article = format!("{}/article", base);
    let builder = context_builder(vec![slow.clone(), article.clone()], local_content_config());

    let context = builder.build("capital of France", 2).await;

    let first = format!(
        "Source: {slow}\nURL: {slow}\n\nContent:\n{NO_CONTENT_MARKER}\n{}\n",
        "=".repeat(50)
    );
    assert!(context.starts_with(&first), "context was:\n{}", context);

    let second = context.find("Source: Paris Facts").unwrap();
    assert!(context[second..].contains(&format!("URL: {}\n", article)));
    assert!(context[second..].contains("Paris is the capital of France."));
    assert!(!context.contains("Home | About"));
}

#[tokio::test]
async fn test_collect_results_match_search_order() {
    let base = serve_pages().await;
    let urls = vec![
        format!("{}/missing", base),
        format!("{}/untitled", base),
        format!("{}/article", base),
    ];
    let builder = context_builder(urls.clone(), local_content_config());

    let results = builder.collect("anything", 3).await;
    let got: Vec<_> = results.iter().map(|r| r.url.clone()).collect();
    assert_eq!(got, urls);

    assert_eq!(results[0].title, urls[0]);
    assert!(!results[0].has_content());
    assert_eq!(results[1].title, urls[1]);
    assert!(results[1].body.contains("No title on this page."));
    assert_eq!(results[2].title, "Paris Facts");
}

#[tokio::test]
async fn test_result_count_is_respected() {
    let base = serve_pages().await;
    let urls = vec![format!("{}/article", base); 5];
    let builder = context_builder(urls, local_content_config());

    assert_eq!(builder.collect("q", 2).await.len(), 2);
    // zero is clamped up to one
    assert_eq!(builder.collect("q", 0).await.len(), 1);
}

#[tokio::test]
async fn test_empty_search_gives_empty_context() {
    let builder = context_builder(Vec::new(), local_content_config());
    assert_eq!(builder.build("nothing matches", 3).await, "");
}

#[tokio::test]
async fn test_disabled_search_gives_empty_context() {
    let config = SearchConfig {
        enabled: false,
        ..Default::default()
    };
    let fetcher = PageFetcher::new(local_content_config()).unwrap();
    let builder = ContextBuilder::new(SearchService::new(config, reqwest::Client::new()), fetcher);

    assert_eq!(builder.build("anything", 3).await, "");
}

#[tokio::test]
async fn test_delay_between_fetches() {
    let base = serve_pages().await;
    let urls = vec![format!("{}/article", base); 3];
    let content = ContentFetchConfig {
        fetch_delay_ms: 250,
        ..local_content_config()
    };
    let builder = context_builder(urls, content);

    let start = Instant::now();
    let results = builder.collect("q", 3).await;
    let elapsed = start.elapsed();

    assert_eq!(results.len(), 3);
    // two pauses for three fetches, none before the first
    assert!(elapsed >= Duration::from_millis(500), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_list_sources_titles_only() {
    let base = serve_pages().await;
    let urls = vec![format!("{}/article", base), format!("{}/missing", base)];
    let builder = context_builder(urls.clone(), local_content_config());

    let sources = builder.list_sources("q", 2).await;
    assert_eq!(sources[0].title, "Paris Facts");
    assert!(sources[0].body.is_empty());
    assert_eq!(sources[1].title, urls[1]);
}

#[tokio::test]
async fn test_duckduckgo_results_feed_context() {
    let pages = serve_pages().await;
    let article = format!("{}/article", pages);
    let encoded: String = url::form_urlencoded::byte_serialize(article.as_bytes()).collect();

    let results_page = format!(
        r#"<html><body>
        <div class="result result--ad"><a class="result__a" href="https://ads.example/">Ad</a></div>
        <div class="result">
          <a class="result__a" href="//duckduckgo.com/l/?uddg={encoded}&amp;rut=x">Paris Facts</a>
          <a class="result__snippet">Paris is the capital.</a>
        </div>
        </body></html>"#
    );
    let ddg = serve(Router::new().route(
        "/html/",
        post(move || {
            let body = results_page.clone();
            async move { Html(body) }
        }),
    ))
    .await;

    let provider = DuckDuckGoProvider::with_endpoint(
        reqwest::Client::new(),
        Duration::from_secs(2),
        &format!("{}/html/", ddg),
    );
    let search = SearchService::with_providers(SearchConfig::default(), vec![Box::new(provider)]);
    let fetcher = PageFetcher::new(local_content_config()).unwrap();
    let builder = ContextBuilder::new(search, fetcher);

    let context = builder.build("capital of France", 3).await;
    assert!(context.contains(&format!("URL: {}\n", article)));
    assert!(context.contains("Paris is the capital of France."));
    assert!(!context.contains("ads.example"));
}

#[tokio::test]
async fn test_duckduckgo_request_sends_browser_user_agent() {
    let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let recorder = seen.clone();
    let ddg = serve(Router::new().route(
        "/html/",
        post(move |headers: HeaderMap| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = headers
                    .get(header::USER_AGENT)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                Html("<html><body></body></html>")
            }
        }),
    ))
    .await;

    let client = http_client(&AppConfig::default()).unwrap();
    let provider =
        DuckDuckGoProvider::with_endpoint(client, Duration::from_secs(2), &format!("{}/html/", ddg));
    let hits = provider.search("q", 3).await.unwrap();

    assert!(hits.is_empty());
    assert_eq!(seen.lock().unwrap().as_deref(), Some(DEFAULT_USER_AGENT));
}
