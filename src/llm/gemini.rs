// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini generateContent backend

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::config::GeminiConfig;
use super::types::{GenerationError, GenerationRequest, Role};
use super::{AnswerGenerator, LlmProvider};

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

/// Answers through `POST {base_url}/v1beta/models/{model}:generateContent`
///
/// The API takes a single text part, so system instruction and history are
/// flattened into one transcript.
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    endpoint: String,
    config: GeminiConfig,
}

impl GeminiGenerator {
    pub fn new(client: Client, api_key: impl Into<String>, config: GeminiConfig) -> Self {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
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

    fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.config.temperature,
            top_k: self.config.top_k,
            top_p: self.config.top_p,
            max_output_tokens: self.config.max_output_tokens,
        }
    }
}

/// Flatten a request into the single prompt text Gemini receives
///
/// Single-shot requests send the prompt alone; chat requests lead with the
/// system text followed by the turn transcript.
pub(crate) fn render_transcript(request: &GenerationRequest) -> String {
    if !request.chat {
        return request.prompt.clone();
    }

    let mut text = String::new();
    if let Some(system) = &request.system {
        text.push_str(system);
        text.push_str("\n\n");
    }

    for turn in &request.history {
        let speaker = match turn.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        text.push_str(speaker);
        text.push_str(": ");
        text.push_str(&turn.content);
        text.push_str("\n\n");
    }
    text.push_str("User: ");
    text.push_str(&request.prompt);
    text.push_str("\nAssistant: ");
    text
}

/// Pull `candidates[0].content.parts[0].text` out of a response body
pub(crate) fn parse_candidate(body: &Value) -> Result<String, GenerationError> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| {
            GenerationError::MalformedResponse(
                "missing candidates[0].content.parts[0].text".to_string(),
            )
        })
}

#[async_trait]
impl AnswerGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let transcript = render_transcript(request);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &transcript }],
            }],
            generation_config: self.generation_config(),
        };
        debug!("Gemini POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .query(&[("key", self.api_key.as_str())])
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
        parse_candidate(&value)
    }

    fn provider(&self) -> LlmProvider {
        LlmProvider::Gemini
    }
}
