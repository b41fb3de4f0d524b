// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DuckDuckGo search provider
//!
//! Implements web search using DuckDuckGo's HTML interface.
//! No API key required, serves as the fallback provider.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

use super::provider::SearchProvider;
use super::types::{SearchError, SearchHit};

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// DuckDuckGo search provider (no API key required)
pub struct DuckDuckGoProvider {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl DuckDuckGoProvider {
    /// Create a new DuckDuckGo provider on a shared client
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self::with_endpoint(client, timeout, DDG_HTML_URL)
    }

    /// Create a provider against a custom endpoint (used by tests)
    pub fn with_endpoint(client: Client, timeout: Duration, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let timeout_ms = self.timeout.as_millis() as u64;
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout { timeout_ms }
                } else {
                    SearchError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: "DuckDuckGo request failed".to_string(),
            });
        }

        let html = response.text().await.map_err(|e| SearchError::ApiError {
            status: 0,
            message: e.to_string(),
        })?;

        Ok(parse_ddg_html(&html, num_results))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn priority(&self) -> u8 {
        50
    }
}

/// Parse the DuckDuckGo HTML results page
///
/// Result blocks are `div.result`; sponsored blocks carry `result--ad` and
/// are skipped. Each block holds an `a.result__a` link and an optional
/// `.result__snippet`.
pub(crate) fn parse_ddg_html(html: &str, max_results: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let (Ok(block_sel), Ok(link_sel), Ok(snippet_sel)) = (
        Selector::parse("div.result"),
        Selector::parse("a.result__a"),
        Selector::parse(".result__snippet"),
    ) else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for block in document.select(&block_sel) {
        if results.len() >= max_results {
            break;
        }
        if block.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let Some(link) = block.select(&link_sel).next() else {
            continue;
        };
        let url = link
            .value()
            .attr("href")
            .map(extract_ddg_url)
            .unwrap_or_default();
        let title = element_text(&link);
        let snippet = block
            .select(&snippet_sel)
            .next()
            .map(|s| element_text(&s))
            .unwrap_or_default();

        if !url.is_empty() && !title.is_empty() {
            results.push(SearchHit {
                title,
                url,
                snippet,
                published_date: None,
                source: "duckduckgo".to_string(),
            });
        }
    }

    results
}

fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the target URL from DuckDuckGo's redirect link
///
/// Redirects look like `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
fn extract_ddg_url(href: &str) -> String {
    if (href.starts_with("http://") || href.starts_with("https://")) && !href.contains("uddg=") {
        return href.to_string();
    }

    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{}", href)
    } else {
        href.to_string()
    };

    Url::parse(&absolute)
        .ok()
        .and_then(|u| {
            u.query_pairs()
                .find(|(k, _)| k == "uddg")
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or_default()
}
