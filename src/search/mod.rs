// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search module
//!
//! Provides the retrieval half of the search-then-ask pipeline:
//! - Search backends (Brave, DuckDuckGo) behind the [`provider::SearchProvider`] trait
//! - Priority failover in [`SearchService`]
//! - Page fetching and content extraction in [`content`]
//! - Chat trigger heuristic in [`trigger`]
//!
//! Failures degrade to empty results; nothing here aborts a query.

pub mod brave;
pub mod config;
pub mod content;
pub mod duckduckgo;
pub mod provider;
pub mod service;
pub mod trigger;
pub mod types;

pub use config::SearchConfig;
pub use provider::SearchProvider;
pub use service::SearchService;
pub use trigger::needs_web_search;
pub use types::{SearchError, SearchHit, SearchResponse};

pub use content::{
    ContentFetchConfig, FetchError, HtmlDocument, PageFetcher, DEFAULT_USER_AGENT, MAX_CHARS_PER_PAGE,
};
