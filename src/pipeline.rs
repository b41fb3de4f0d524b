// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search-then-ask pipeline
//!
//! Wires the context builder to an answer generator. `ask` always searches;
//! `chat` searches when the toggle is on or the message looks like a lookup.

use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::config::{AppConfig, ConfigError};
use crate::context::{ContextBuilder, SearchResult};
use crate::llm::{build_generator, AnswerGenerator, ConversationTurn, LlmProvider};
use crate::search::{needs_web_search, PageFetcher, SearchService};

/// Result of a single-shot question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    /// Context document the answer was grounded in (may be empty)
    pub context: String,
    pub answer: String,
}

/// Result of one chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    /// Whether a web search was made for this turn
    pub searched: bool,
    pub context: String,
    pub answer: String,
}

pub struct SearchPipeline {
    builder: ContextBuilder,
    generator: Box<dyn AnswerGenerator>,
}

impl SearchPipeline {
    pub fn new(builder: ContextBuilder, generator: Box<dyn AnswerGenerator>) -> Self {
        Self { builder, generator }
    }

    /// Build every component from configuration
    ///
    /// Fails before any network work when the provider's API key is missing.
    pub fn from_config(config: &AppConfig, provider: LlmProvider) -> Result<Self, ConfigError> {
        let client = http_client(config)?;
        let generator = build_generator(provider, config, client.clone())?;
        let builder = build_context(config, client)?;
        Ok(Self::new(builder, generator))
    }

    pub fn provider(&self) -> LlmProvider {
        self.generator.provider()
    }

    /// Search the web for `query` and answer from what was found
    pub async fn ask(&self, query: &str, num_results: usize) -> Answer {
        let context = self.builder.build(query, num_results).await;
        info!(
            "Context for {:?}: {} chars, asking {}",
            query,
            context.len(),
            self.provider().display_name()
        );
        let answer = self.generator.answer(query, Some(&context), None).await;
        Answer { context, answer }
    }

    /// Answer one chat message given the prior turns
    ///
    /// `history` is read, never modified; the caller appends the new turns.
    pub async fn chat(
        &self,
        input: &str,
        history: &[ConversationTurn],
        search_enabled: bool,
        num_results: usize,
    ) -> ChatReply {
        let searched = needs_web_search(input, search_enabled);
        let context = if searched {
            self.builder.build(input, num_results).await
        } else {
            String::new()
        };

        let grounding = searched.then_some(context.as_str());
        let answer = self.generator.answer(input, grounding, Some(history)).await;
        ChatReply {
            searched,
            context,
            answer,
        }
    }

    /// Titles and URLs of the pages a query would draw on
    pub async fn sources(&self, query: &str, num_results: usize) -> Vec<SearchResult> {
        self.builder.list_sources(query, num_results).await
    }
}

/// Context builder alone, for commands that never call a model
pub fn context_builder(config: &AppConfig) -> Result<ContextBuilder, ConfigError> {
    build_context(config, http_client(config)?)
}

fn build_context(config: &AppConfig, client: Client) -> Result<ContextBuilder, ConfigError> {
    let search = SearchService::new(config.search.clone(), client);
    let fetcher = PageFetcher::new(config.content.clone())
        .map_err(|e| ConfigError::Invalid(format!("page fetcher: {}", e)))?;
    Ok(ContextBuilder::new(search, fetcher))
}

/// Client shared by search backends and model calls, sending the
/// configured browser user agent
pub fn http_client(config: &AppConfig) -> Result<Client, ConfigError> {
    Client::builder()
        .user_agent(config.content.user_agent.as_str())
        .build()
        .map_err(|e| ConfigError::Invalid(format!("HTTP client: {}", e)))
}
