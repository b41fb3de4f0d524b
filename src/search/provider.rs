// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definition

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::types::{SearchError, SearchHit};

/// Trait for implementing search backends
///
/// Backends return hits in their own order; nothing downstream re-ranks
/// them. Multiple backends can be registered with the search service and
/// are tried in priority order.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    /// * `query` - The search query string
    /// * `num_results` - Maximum number of results to return
    async fn search(&self, query: &str, num_results: usize)
        -> Result<Vec<SearchHit>, SearchError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider is available (has API key, etc.)
    fn is_available(&self) -> bool;

    /// Get provider priority (lower = preferred)
    fn priority(&self) -> u8 {
        100
    }
}
