// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for content fetching
//!
//! Defines timeouts, the per-page character budget and the inter-fetch
//! throttle.

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Upper bound on the characters kept from any one page
pub const MAX_CHARS_PER_PAGE: usize = 2000;

/// Browser user agent sent with every page fetch and search request; some
/// sites reject default HTTP client agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for content fetching
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentFetchConfig {
    /// Timeout for title-only probes in milliseconds (default: 5000)
    pub title_timeout_ms: u64,
    /// Timeout for full content fetches in milliseconds (default: 10000)
    pub content_timeout_ms: u64,
    /// Maximum characters kept per page (default: 2000)
    pub max_chars_per_page: usize,
    /// Pause between successive page fetches in milliseconds (default: 1000)
    pub fetch_delay_ms: u64,
    /// User agent header for page fetches
    pub user_agent: String,
    /// Refuse loopback, private and link-local hosts (default: true)
    pub block_private_hosts: bool,
}

impl ContentFetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment variable overrides on top of `self`
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_parse("CONTENT_FETCH_TITLE_TIMEOUT_MS") {
            self.title_timeout_ms = v;
        }
        if let Some(v) = env_parse("CONTENT_FETCH_TIMEOUT_MS") {
            self.content_timeout_ms = v;
        }
        if let Some(v) = env_parse("CONTENT_FETCH_MAX_CHARS_PER_PAGE") {
            self.max_chars_per_page = v;
        }
        if let Some(v) = env_parse("CONTENT_FETCH_DELAY_MS") {
            self.fetch_delay_ms = v;
        }
        if let Ok(agent) = env::var("CONTENT_FETCH_USER_AGENT") {
            self.user_agent = agent;
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.title_timeout_ms == 0 || self.content_timeout_ms == 0 {
            return Err("fetch timeouts must be greater than 0".to_string());
        }
        if self.max_chars_per_page < 100 || self.max_chars_per_page > MAX_CHARS_PER_PAGE {
            return Err(format!(
                "max_chars_per_page must be between 100 and {}",
                MAX_CHARS_PER_PAGE
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
    }

    pub fn title_timeout(&self) -> Duration {
        Duration::from_millis(self.title_timeout_ms)
    }

    pub fn content_timeout(&self) -> Duration {
        Duration::from_millis(self.content_timeout_ms)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl Default for ContentFetchConfig {
    fn default() -> Self {
        Self {
            title_timeout_ms: 5000,
            content_timeout_ms: 10000,
            max_chars_per_page: 2000,
            fetch_delay_ms: 1000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            block_private_hosts: true,
        }
    }
}
