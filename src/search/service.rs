// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Tries the registered backends in priority order and returns the first
//! successful response. Callers that only need URLs use [`SearchService::search`],
//! which never fails: a disabled service or an outage of every backend
//! yields an empty list.

use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::brave::BraveSearchProvider;
use super::config::SearchConfig;
use super::duckduckgo::DuckDuckGoProvider;
use super::provider::SearchProvider;
use super::types::{SearchError, SearchResponse};

/// Search service that orchestrates providers with failover
pub struct SearchService {
    providers: Vec<Box<dyn SearchProvider>>,
    config: SearchConfig,
}

impl SearchService {
    /// Create a search service from configuration
    ///
    /// Brave is registered when a key is configured; DuckDuckGo is always
    /// registered as the fallback.
    pub fn new(config: SearchConfig, client: Client) -> Self {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let mut providers: Vec<Box<dyn SearchProvider>> = Vec::new();

        if let Some(api_key) = config.brave_api_key.as_ref().filter(|_| config.has_brave()) {
            providers.push(Box::new(BraveSearchProvider::new(
                api_key.clone(),
                client.clone(),
                timeout,
            )));
            debug!("Brave Search provider enabled");
        }

        providers.push(Box::new(DuckDuckGoProvider::new(client, timeout)));
        debug!("DuckDuckGo provider enabled (fallback)");

        Self::with_providers(config, providers)
    }

    /// Create a search service over an explicit set of providers
    pub fn with_providers(config: SearchConfig, mut providers: Vec<Box<dyn SearchProvider>>) -> Self {
        // Lower priority value = preferred
        providers.sort_by_key(|p| p.priority());
        Self { providers, config }
    }

    /// Search and return the result URLs in backend order
    ///
    /// Never fails: any error is logged and resolves to an empty list.
    pub async fn search(&self, query: &str, count: usize) -> Vec<String> {
        match self.try_search(query, count).await {
            Ok(response) => response.urls(),
            Err(e) => {
                warn!("Web search for {:?} returned no results: {}", query, e);
                Vec::new()
            }
        }
    }

    /// Perform a search, surfacing the failure reason
    ///
    /// # Arguments
    /// * `query` - The search query
    /// * `count` - Maximum number of results
    pub async fn try_search(&self, query: &str, count: usize) -> Result<SearchResponse, SearchError> {
        if !self.config.enabled {
            return Err(SearchError::SearchDisabled);
        }

        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery {
                reason: "query is empty".to_string(),
            });
        }

        let start = Instant::now();
        let mut last_error = None;

        for provider in &self.providers {
            if !provider.is_available() {
                continue;
            }

            debug!("Trying search provider: {}", provider.name());

            match provider.search(query, count).await {
                Ok(mut results) => {
                    results.truncate(count);
                    let elapsed_ms = start.elapsed().as_millis() as u64;

                    info!(
                        "Search complete: {} results from {} in {}ms",
                        results.len(),
                        provider.name(),
                        elapsed_ms
                    );

                    return Ok(SearchResponse {
                        query: query.to_string(),
                        result_count: results.len(),
                        results,
                        search_time_ms: elapsed_ms,
                        provider: provider.name().to_string(),
                    });
                }
                Err(e) => {
                    warn!(
                        "Search provider {} failed: {}, trying next",
                        provider.name(),
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(SearchError::ProviderUnavailable {
            provider: "all".to_string(),
        }))
    }

    /// Check if search is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Names of the available providers, in the order they are tried
    pub fn available_providers(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|p| p.is_available())
            .map(|p| p.name())
            .collect()
    }
}
