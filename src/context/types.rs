// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context document types and rendering

use serde::Serialize;
use std::fmt;

/// Width of the `=` rule closing every entry
pub const SEPARATOR_WIDTH: usize = 50;

/// Shown in place of content when extraction produced nothing
pub const NO_CONTENT_MARKER: &str = "[No content extracted]";

/// A search hit after its page has been fetched and extracted
///
/// `title` and `body` are derived once from a single fetch. A failed fetch
/// leaves the URL as title and an empty body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub body: String,
}

impl SearchResult {
    pub fn new(url: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Result for a URL whose page could not be fetched
    pub fn unfetched(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: url.clone(),
            url,
            body: String::new(),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.body.is_empty()
    }

    /// Formatted view of this result inside a context document
    pub fn entry(&self) -> ContextEntry<'_> {
        ContextEntry { result: self }
    }
}

/// Labeled block rendering of one [`SearchResult`]
///
/// ```text
/// Source: {title}
/// URL: {url}
///
/// Content:
/// {body or "[No content extracted]"}
/// ==================================================
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContextEntry<'a> {
    result: &'a SearchResult,
}

impl fmt::Display for ContextEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = if self.result.has_content() {
            self.result.body.as_str()
        } else {
            NO_CONTENT_MARKER
        };
        writeln!(f, "Source: {}", self.result.title)?;
        writeln!(f, "URL: {}", self.result.url)?;
        writeln!(f)?;
        writeln!(f, "Content:")?;
        writeln!(f, "{}", body)?;
        writeln!(f, "{}", "=".repeat(SEPARATOR_WIDTH))
    }
}

/// Concatenate entries in order, separated by a blank line
///
/// Zero results render to the empty string.
pub fn render_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.entry().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
