// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page fetching and content extraction for search results
//!
//! ## Architecture
//!
//! ```text
//! URL → PageFetcher → HtmlDocument ─┬→ extract_title        → title (or URL)
//!                                   └→ extract_main_content → clean text (≤ 2000 chars)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let fetcher = PageFetcher::new(ContentFetchConfig::from_env())?;
//! match fetcher.fetch_for_content("https://example.com").await {
//!     Ok(doc) => println!("{}\n{}", doc.title(), doc.main_content(2000)),
//!     Err(e) => eprintln!("no content: {}", e),
//! }
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;

pub use config::{ContentFetchConfig, DEFAULT_USER_AGENT, MAX_CHARS_PER_PAGE};
pub use extractor::{extract_main_content, extract_title};
pub use fetcher::{FetchError, HtmlDocument, PageFetcher};
