// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Conversation and generation types shared by both LLM backends

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

use super::LlmProvider;

/// Default number of turns a chat history retains
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Bounded FIFO of conversation turns
///
/// Pushing onto a full history evicts the oldest turn, so the most recent
/// `capacity` turns are kept in their original order.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
}

impl ChatHistory {
    /// Create a history holding at most `capacity` turns (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        while self.turns.len() >= self.capacity {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// Owned copy of the retained turns, oldest first
    pub fn snapshot(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

/// Backend-neutral description of one model call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// System instruction, if any
    pub system: Option<String>,
    /// Prior turns, oldest first
    pub history: Vec<ConversationTurn>,
    /// The final user message (grounded instruction or bare question)
    pub prompt: String,
    /// Multi-turn chat framing rather than a single-shot question
    pub chat: bool,
}

/// Failure of a model call
///
/// Never surfaced to callers of `answer`; converted to a diagnostic string.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Connection or protocol failure
    #[error("{0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("request timed out after {0}ms")]
    Timeout(u64),

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Body was not JSON or lacked the expected fields
    #[error("{0}")]
    MalformedResponse(String),
}

impl GenerationError {
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_ms: u64) -> Self {
        if e.is_timeout() {
            GenerationError::Timeout(timeout_ms)
        } else {
            GenerationError::Transport(e.to_string())
        }
    }

    /// Human-readable text returned in place of an answer
    pub fn diagnostic(&self, provider: LlmProvider) -> String {
        match self {
            GenerationError::MalformedResponse(reason) => {
                format!("Error parsing {} response: {}", provider.display_name(), reason)
            }
            other => format!("Error querying {}: {}", provider.api_name(), other),
        }
    }
}
