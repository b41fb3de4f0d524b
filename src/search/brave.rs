// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Brave Search API provider
//!
//! Preferred over DuckDuckGo whenever an API key is configured.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::provider::SearchProvider;
use super::types::{SearchError, SearchHit};

const BRAVE_API_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Brave caps `count` at 20 per request
const BRAVE_MAX_COUNT: usize = 20;

/// Brave Search API provider
pub struct BraveSearchProvider {
    api_key: String,
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl BraveSearchProvider {
    /// Create a new Brave Search provider
    ///
    /// # Arguments
    /// * `api_key` - Brave Search API key
    /// * `client` - Shared HTTP client
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: String, client: Client, timeout: Duration) -> Self {
        Self {
            api_key,
            client,
            endpoint: BRAVE_API_URL.to_string(),
            timeout,
        }
    }

    /// Point the provider at a different endpoint (used by tests)
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

#[async_trait]
impl SearchProvider for BraveSearchProvider {
    async fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let timeout_ms = self.timeout.as_millis() as u64;
        let count = num_results.min(BRAVE_MAX_COUNT).to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .query(&[("q", query), ("count", count.as_str())])
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

        let status = response.status();

        if status == 429 {
            return Err(SearchError::RateLimited {
                retry_after_secs: 60,
            });
        }

        if status == 401 || status == 403 {
            return Err(SearchError::NoApiKey {
                provider: "brave".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let data: BraveResponse = response.json().await.map_err(|e| SearchError::ApiError {
            status: 0,
            message: format!("JSON parse error: {}", e),
        })?;

        Ok(data
            .web
            .map(|web| web.results)
            .unwrap_or_default()
            .into_iter()
            .take(num_results)
            .map(|r| SearchHit {
                title: r.title,
                url: r.url,
                snippet: r.description.unwrap_or_default(),
                published_date: r.age,
                source: "brave".to_string(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "brave"
    }

    fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn priority(&self) -> u8 {
        10
    }
}

#[derive(Debug, serde::Deserialize)]
struct BraveResponse {
    // Absent when the query produced no web results
    web: Option<BraveWebResults>,
}

#[derive(Debug, serde::Deserialize)]
struct BraveWebResults {
    results: Vec<BraveResult>,
}

#[derive(Debug, serde::Deserialize)]
struct BraveResult {
    title: String,
    url: String,
    description: Option<String>,
    age: Option<String>,
}
