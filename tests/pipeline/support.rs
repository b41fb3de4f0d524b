// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Shared fixtures: local HTTP servers and a fixed-result search backend
#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::{Json, Router};
use search_shell::context::ContextBuilder;
use search_shell::search::{
    ContentFetchConfig, PageFetcher, SearchConfig, SearchError, SearchHit, SearchProvider,
    SearchService,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ARTICLE_HTML: &str = r#"<html>
<head><title>Paris Facts</title><script>var tracking = 1;</script></head>
<body>
  <nav>Home | About | Contact</nav>
  <main>
    <h1>France</h1>
    <p>Paris is the capital of France.</p>
  </main>
  <footer>Copyright 2024</footer>
</body>
</html>"#;

pub const UNTITLED_HTML: &str = "<html><body><p>No title on this page.</p></body></html>";

/// Serve `app` on an ephemeral localhost port, returning its base URL
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Pages covering every fetch outcome
pub fn pages() -> Router {
    Router::new()
        .route("/article", get(|| async { Html(ARTICLE_HTML) }))
        .route("/untitled", get(|| async { Html(UNTITLED_HTML) }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Html(ARTICLE_HTML)
            }),
        )
        .route("/missing", get(|| async { (StatusCode::NOT_FOUND, "gone") }))
        .route("/moved", get(|| async { Redirect::permanent("/article") }))
}

pub async fn serve_pages() -> String {
    serve(pages()).await
}

/// Fetch settings that allow localhost and keep tests fast
pub fn local_content_config() -> ContentFetchConfig {
    ContentFetchConfig {
        title_timeout_ms: 500,
        content_timeout_ms: 500,
        fetch_delay_ms: 0,
        block_private_hosts: false,
        ..Default::default()
    }
}

/// Search backend returning a fixed URL list
pub struct StaticSearch {
    urls: Vec<String>,
}

impl StaticSearch {
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, _query: &str, num_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        Ok(self
            .urls
            .iter()
            .take(num_results)
            .map(|url| SearchHit {
                title: String::new(),
                url: url.clone(),
                snippet: String::new(),
                published_date: None,
                source: "static".to_string(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "static"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn priority(&self) -> u8 {
        1
    }
}

pub fn static_search(urls: Vec<String>) -> SearchService {
    SearchService::with_providers(
        SearchConfig::default(),
        vec![Box::new(StaticSearch::new(urls))],
    )
}

pub fn context_builder(urls: Vec<String>, content: ContentFetchConfig) -> ContextBuilder {
    let fetcher = PageFetcher::new(content).unwrap();
    ContextBuilder::new(static_search(urls), fetcher)
}

pub struct Captured {
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Stand-in LLM API recording every request it receives
#[derive(Clone)]
pub struct MockLlm {
    pub requests: Arc<Mutex<Vec<Captured>>>,
    pub status: StatusCode,
    pub reply: Value,
    pub delay: Duration,
}

impl MockLlm {
    pub fn replying(reply: Value) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            status: StatusCode::OK,
            reply,
            delay: Duration::ZERO,
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::replying(json!({"error": {"message": "upstream exploded"}}))
        }
    }

    pub fn take(&self) -> Vec<Captured> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

async fn handle(
    State(mock): State<MockLlm>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.requests.lock().unwrap().push(Captured {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });
    if !mock.delay.is_zero() {
        tokio::time::sleep(mock.delay).await;
    }
    (mock.status, Json(mock.reply.clone()))
}

impl MockLlm {
    /// Serve on every path; returns the base URL
    pub async fn start(&self) -> String {
        serve(Router::new().fallback(handle).with_state(self.clone())).await
    }
}

pub fn openai_reply(text: &str) -> Value {
    json!({"choices": [{"index": 0, "message": {"role": "assistant", "content": text}}]})
}

pub fn gemini_reply(text: &str) -> Value {
    json!({"candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]})
}
