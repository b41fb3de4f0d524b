// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Answer generation over hosted LLM APIs
//!
//! Two interchangeable backends (OpenAI chat completions and Gemini
//! generateContent) sit behind [`AnswerGenerator`]. Callers use `answer`
//! on a `dyn AnswerGenerator`, which always yields text: backend failures
//! come back as diagnostic strings rather than errors.

pub mod config;
pub mod gemini;
pub mod openai;
pub mod prompt;
pub mod types;

pub use config::{GeminiConfig, OpenAiConfig};
pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;
pub use prompt::{build_request, grounded_prompt, NO_CONTEXT_NOTICE};
pub use types::{
    ChatHistory, ConversationTurn, GenerationError, GenerationRequest, Role,
    DEFAULT_HISTORY_CAPACITY,
};

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

#[cfg(test)]
use mockall::automock;

use crate::config::{AppConfig, ConfigError};

/// A hosted model that turns a prepared request into text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Perform one model call
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Which backend this is
    fn provider(&self) -> LlmProvider;
}

impl dyn AnswerGenerator {
    /// Answer `query`, grounded in `context` when a search was made
    ///
    /// `context` is `None` when no search was attempted; the bare question
    /// is sent. A blank `Some` context means the search came back empty: the
    /// bare question is sent and the reply is prefixed with
    /// [`NO_CONTEXT_NOTICE`]. `history` is `None` for a single-shot question
    /// and the prior turns for chat. Never fails: a backend error is
    /// returned as its diagnostic text.
    pub async fn answer(
        &self,
        query: &str,
        context: Option<&str>,
        history: Option<&[ConversationTurn]>,
    ) -> String {
        let request = build_request(query, context.unwrap_or_default(), history);
        let reply = match self.generate(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!("{} generation failed: {}", self.provider().display_name(), e);
                e.diagnostic(self.provider())
            }
        };

        match context {
            Some(c) if c.trim().is_empty() => format!("{}\n\n{}", NO_CONTEXT_NOTICE, reply),
            _ => reply,
        }
    }
}

/// Which backend answers questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    #[default]
    OpenAi,
    Gemini,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "openai",
            LlmProvider::Gemini => "gemini",
        }
    }

    /// Name used in diagnostics
    pub fn display_name(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OpenAI",
            LlmProvider::Gemini => "Gemini",
        }
    }

    /// Name of the remote API in transport diagnostics
    pub fn api_name(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OpenAI",
            LlmProvider::Gemini => "Gemini API",
        }
    }

    /// Short tag for chat transcripts
    pub fn label(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "GPT",
            LlmProvider::Gemini => "Gemini",
        }
    }

    /// Environment variable holding this backend's key
    pub fn api_key_var(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "OPENAI_API_KEY",
            LlmProvider::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" => Ok(LlmProvider::OpenAi),
            "gemini" => Ok(LlmProvider::Gemini),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// Construct the generator for `provider`
///
/// Fails when the provider's API key is missing or blank.
pub fn build_generator(
    provider: LlmProvider,
    config: &AppConfig,
    client: Client,
) -> Result<Box<dyn AnswerGenerator>, ConfigError> {
    let api_key = config.api_key(provider)?.to_string();
    let generator: Box<dyn AnswerGenerator> = match provider {
        LlmProvider::OpenAi => {
            let generator = OpenAiGenerator::new(client, api_key, config.openai.clone());
            info!("Answer generator: OpenAI model={}", generator.model());
            Box::new(generator)
        }
        LlmProvider::Gemini => {
            let generator = GeminiGenerator::new(client, api_key, config.gemini.clone());
            info!("Answer generator: Gemini model={}", generator.model());
            Box::new(generator)
        }
    };
    Ok(generator)
}
