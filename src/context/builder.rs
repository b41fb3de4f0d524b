// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context construction: search → fetch → extract → format
//!
//! Pages are fetched one at a time with a fixed pause between fetches to
//! stay under anti-scraping thresholds. Each URL is fetched once; title and
//! content both come from that single response.

use tracing::{info, warn};

use super::types::{render_context, SearchResult};
use crate::search::config::MAX_NUM_RESULTS;
use crate::search::content::PageFetcher;
use crate::search::SearchService;

/// Builds context documents for queries
pub struct ContextBuilder {
    search: SearchService,
    fetcher: PageFetcher,
}

impl ContextBuilder {
    pub fn new(search: SearchService, fetcher: PageFetcher) -> Self {
        Self { search, fetcher }
    }

    /// Build the context document for `query`
    ///
    /// Returns the empty string when search produced no URLs.
    pub async fn build(&self, query: &str, num_results: usize) -> String {
        let results = self.collect(query, num_results).await;
        render_context(&results)
    }

    /// Search, then fetch and extract every result in search order
    ///
    /// `num_results` is clamped to `1..=10`.
    pub async fn collect(&self, query: &str, num_results: usize) -> Vec<SearchResult> {
        self.fetch_each(query, num_results, Probe::Content).await
    }

    /// Search and probe each result for its title only
    ///
    /// Uses the short title timeout; bodies are left empty.
    pub async fn list_sources(&self, query: &str, num_results: usize) -> Vec<SearchResult> {
        self.fetch_each(query, num_results, Probe::Title).await
    }

    async fn fetch_each(&self, query: &str, num_results: usize, probe: Probe) -> Vec<SearchResult> {
        let count = clamp_num_results(num_results);
        let urls = self.search.search(query, count).await;
        if urls.is_empty() {
            info!("No search results for {:?}; context is empty", query);
            return Vec::new();
        }

        let config = self.fetcher.config();
        let delay = config.fetch_delay();
        let max_chars = config.max_chars_per_page;
        let mut results = Vec::with_capacity(urls.len());

        for (i, url) in urls.into_iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            info!("Fetching content from: {}", url);
            let fetched = match probe {
                Probe::Title => self.fetcher.fetch_for_title(&url).await,
                Probe::Content => self.fetcher.fetch_for_content(&url).await,
            };

            let result = match fetched {
                Ok(doc) => {
                    let body = match probe {
                        Probe::Title => String::new(),
                        Probe::Content => doc.main_content(max_chars),
                    };
                    SearchResult::new(url, doc.title(), body)
                }
                Err(e) => {
                    warn!("No content from {}: {}", url, e);
                    SearchResult::unfetched(url)
                }
            };
            results.push(result);
        }

        results
    }
}

#[derive(Debug, Clone, Copy)]
enum Probe {
    Title,
    Content,
}

/// Clamp a caller-supplied result count into `1..=10`
pub fn clamp_num_results(num_results: usize) -> usize {
    num_results.clamp(1, MAX_NUM_RESULTS)
}
