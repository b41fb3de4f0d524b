// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Context document construction
//!
//! Turns a query into the grounding text handed to the answer generator:
//! search results are fetched, extracted and rendered as labeled entries in
//! search order.

pub mod builder;
pub mod types;

pub use builder::{clamp_num_results, ContextBuilder};
pub use types::{render_context, ContextEntry, SearchResult, NO_CONTENT_MARKER};
