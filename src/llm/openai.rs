// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! OpenAI chat-completions backend

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::config::OpenAiConfig;
use super::types::{GenerationError, GenerationRequest};
use super::{AnswerGenerator, LlmProvider};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

/// Answers through `POST {base_url}/v1/chat/completions`
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    endpoint: String,
    config: OpenAiConfig,
}

impl OpenAiGenerator {
    pub fn new(client: Client, api_key: impl Into<String>, config: OpenAiConfig) -> Self {
        let endpoint = format!(
            "{}/v1/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        Self {
            client,
            api_key: api_key.into(),
            endpoint,
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_body<'a>(&'a self, request: &'a GenerationRequest) -> ChatCompletionRequest<'a> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        for turn in &request.history {
            messages.push(ChatMessage {
                role: turn.role.as_str(),
                content: &turn.content,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        ChatCompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

/// Pull `choices[0].message.content` out of a completion body
pub(crate) fn parse_completion(body: &Value) -> Result<String, GenerationError> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| {
            GenerationError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

#[async_trait]
impl AnswerGenerator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = self.build_body(request);
        debug!("OpenAI POST {} (model={})", self.endpoint, self.config.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .timeout(self.config.timeout())
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::from_reqwest(e, self.config.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        parse_completion(&value)
    }

    fn provider(&self) -> LlmProvider {
        LlmProvider::OpenAi
    }
}
