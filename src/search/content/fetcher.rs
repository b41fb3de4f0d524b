// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP page fetching
//!
//! Fetches web pages returned by search. Every failure mode (blocked URL,
//! transport error, timeout, non-2xx status) is a [`FetchError`], which
//! callers treat as "no content" rather than as fatal.

use reqwest::Client;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::{Host, Url};

use super::config::ContentFetchConfig;
use super::extractor::{extract_main_content, extract_title};

/// Maximum redirects followed per fetch
const MAX_REDIRECTS: usize = 5;

/// Raw HTML of a successfully fetched page
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    /// The URL that was requested
    pub url: String,
    /// Response body
    pub html: String,
}

impl HtmlDocument {
    /// Page title, or the requested URL when the page has none
    pub fn title(&self) -> String {
        extract_title(&self.html).unwrap_or_else(|| self.url.clone())
    }

    /// Readable text of the primary content region, capped at `max_chars`
    pub fn main_content(&self, max_chars: usize) -> String {
        extract_main_content(&self.html, max_chars)
    }
}

/// Content fetch error types
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),
    /// Transport-level HTTP error
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Non-success HTTP status
    #[error("HTTP {0} for: {1}")]
    HttpStatus(u16, String),
    /// URL is malformed, not http(s), or points at a private host
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),
}

/// Page fetcher with a browser user agent and two timeout tiers
pub struct PageFetcher {
    client: Client,
    config: ContentFetchConfig,
}

impl PageFetcher {
    /// Create a new page fetcher
    pub fn new(config: ContentFetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch a page with an explicit timeout
    pub async fn fetch(&self, url: &str, timeout: Duration) -> Result<HtmlDocument, FetchError> {
        if self.config.block_private_hosts && !Self::is_safe_url(url) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }
        if Url::parse(url).is_err() {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        debug!("Fetching page: {}", url);

        let map_send_err = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::HttpError(e.to_string())
            }
        };

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_send_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        let html = response.text().await.map_err(map_send_err)?;

        info!("Fetched {} bytes from: {}", html.len(), url);

        Ok(HtmlDocument {
            url: url.to_string(),
            html,
        })
    }

    /// Fetch with the short timeout used for title-only probes
    pub async fn fetch_for_title(&self, url: &str) -> Result<HtmlDocument, FetchError> {
        self.fetch(url, self.config.title_timeout()).await
    }

    /// Fetch with the long timeout used for content extraction
    pub async fn fetch_for_content(&self, url: &str) -> Result<HtmlDocument, FetchError> {
        self.fetch(url, self.config.content_timeout()).await
    }

    /// Check if URL is safe to fetch (http/https, not loopback/private/link-local)
    pub fn is_safe_url(url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        if !["http", "https"].contains(&parsed.scheme()) {
            return false;
        }

        match parsed.host() {
            Some(Host::Domain(domain)) => {
                let domain = domain.to_lowercase();
                domain != "localhost" && !domain.ends_with(".localhost")
            }
            Some(Host::Ipv4(ip)) => !is_private_ipv4(ip),
            Some(Host::Ipv6(ip)) => !is_private_ipv6(ip),
            None => false,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ContentFetchConfig {
        &self.config
    }
}

fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified()
}

fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(mapped) = ip.to_ipv4_mapped() {
        return is_private_ipv4(mapped);
    }
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        || (first & 0xfe00) == 0xfc00 // unique local
        || (first & 0xffc0) == 0xfe80 // link local
}
