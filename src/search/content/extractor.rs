// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML content extraction
//!
//! Pulls the page title and the readable text of the primary content
//! region out of fetched HTML. Extraction is best effort: anything that
//! cannot be found resolves to `None` or an empty string.

use scraper::{ElementRef, Html, Selector};

use super::config::MAX_CHARS_PER_PAGE;

/// Elements removed before any text is read
const NOISE_SELECTOR: &str = "script, style, nav, header, footer, iframe, noscript";

/// Candidates for the primary content node, tried in order
const PRIMARY_SELECTORS: &[&str] = &[
    "main",
    "article",
    "div.content, div.main, div.article",
    "body",
];

/// Extract the trimmed `<title>` text, if present and non-empty
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Extract main content from HTML
///
/// 1. Drops script, style, nav, header, footer, iframe and noscript subtrees
/// 2. Picks the first `<main>`, else `<article>`, else a `div` classed
///    `content`/`main`/`article`, else `<body>`
/// 3. Joins its text nodes line by line, trimming and dropping blank lines
/// 4. Keeps at most `max_chars` characters, never more than
///    [`MAX_CHARS_PER_PAGE`]
pub fn extract_main_content(html: &str, max_chars: usize) -> String {
    let mut document = Html::parse_document(html);
    strip_noise(&mut document);

    let text = block_text(&primary_content(&document));
    truncate_chars(&text, max_chars.min(MAX_CHARS_PER_PAGE))
}

fn strip_noise(document: &mut Html) {
    let Ok(selector) = Selector::parse(NOISE_SELECTOR) else {
        return;
    };

    let noise: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
    for id in noise {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

// Selection walks from the root element: `Html::select` scans the whole
// node arena and would still see detached noise.
fn primary_content(document: &Html) -> ElementRef<'_> {
    let root = document.root_element();

    PRIMARY_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| root.select(&selector).next())
        .unwrap_or(root)
}

/// One line per text node, trimmed, blank lines dropped
fn block_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cut to the first `max_chars` characters, never splitting a code point
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
