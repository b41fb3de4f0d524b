// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for web search functionality

use serde::Deserialize;
use std::env;

/// Upper bound on results a caller may request per query
pub const MAX_NUM_RESULTS: usize = 10;

/// Configuration for web search functionality
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Whether web search is enabled
    pub enabled: bool,
    /// Brave Search API key; DuckDuckGo is used when absent
    pub brave_api_key: Option<String>,
    /// Default number of results per search
    pub default_num_results: usize,
    /// Request timeout for search backends in milliseconds
    pub request_timeout_ms: u64,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides on top of `self`
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("WEB_SEARCH_ENABLED") {
            self.enabled = v.to_lowercase() != "false";
        }
        if let Ok(key) = env::var("BRAVE_API_KEY") {
            self.brave_api_key = Some(key);
        }
        if let Some(n) = env::var("SEARCH_NUM_RESULTS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.default_num_results = n;
        }
        if let Some(ms) = env::var("SEARCH_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.request_timeout_ms = ms;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_num_results == 0 || self.default_num_results > MAX_NUM_RESULTS {
            return Err(format!(
                "default_num_results must be between 1 and {}",
                MAX_NUM_RESULTS
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err("request_timeout_ms must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Check if a keyed search provider is configured
    pub fn has_brave(&self) -> bool {
        self.brave_api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true, // DuckDuckGo needs no API key
            brave_api_key: None,
            default_num_results: 3,
            request_timeout_ms: 10000,
        }
    }
}
