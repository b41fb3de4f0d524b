// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod config;
pub mod context;
pub mod llm;
pub mod pipeline;
pub mod search;

pub use config::{AppConfig, ConfigError};
pub use context::{ContextBuilder, SearchResult};
pub use llm::{AnswerGenerator, ChatHistory, ConversationTurn, LlmProvider};
pub use pipeline::{Answer, ChatReply, SearchPipeline};
pub use search::{PageFetcher, SearchService};
