// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search activation for chat input
//!
//! Decides whether a chat message should run web search before the model
//! is asked.

/// Phrases that activate web search when found anywhere in the message
pub const TRIGGER_PHRASES: &[&str] = &["search", "look up", "find out", "what is", "who is"];

/// Check if a chat message should run web search
///
/// Returns true when `search_enabled` is set, or when the lowercased
/// message contains any of [`TRIGGER_PHRASES`]. Matching is plain
/// substring matching with no word boundaries: "research" matches "search".
pub fn needs_web_search(message: &str, search_enabled: bool) -> bool {
    if search_enabled {
        return true;
    }

    let lower = message.to_lowercase();
    TRIGGER_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
