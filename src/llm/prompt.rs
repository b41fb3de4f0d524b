// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt text and request assembly

use super::types::{ConversationTurn, GenerationRequest};

/// Number of most recent history turns sent with a chat request
pub const MAX_HISTORY_TURNS: usize = 10;

/// Prefix of every answer produced without web context
pub const NO_CONTEXT_NOTICE: &str = "No context was found from web searches. The model will provide a general response without current information.";

/// System instruction for single-shot questions
pub const SINGLE_SHOT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// System instruction for multi-turn chat
pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant with access to web search capabilities. \
You can search the internet when needed to provide up-to-date information. \
Always maintain context of the conversation and provide accurate, relevant responses. \
ALWAYS incorporate emojis wherever possible and relevant to make your answers interesting.";

/// Instruction that grounds the answer in `context`
///
/// The context is embedded verbatim.
pub fn grounded_prompt(query: &str, context: &str) -> String {
    format!(
        "Context from web searches:\n\n{context}\n\n\
         Question: {query}\n\n\
         Please provide a comprehensive answer based on the context above. \
         Please ensure the answer is detailed with points wherever necessary. \
         Use emojis wherever needed to make your answers interesting. \
         Please ensure that the answer is properly formatted for reading. \
         If the context doesn't contain relevant information, please state so clearly \
         instead of inventing sourced facts, and then provide whatever info you have on the topic."
    )
}

/// Assemble the backend-neutral request for one answer
///
/// Blank `context` yields the bare question with no grounding instruction.
/// `history` is `None` for single-shot questions; for chat only the last
/// [`MAX_HISTORY_TURNS`] turns are kept.
pub fn build_request(
    query: &str,
    context: &str,
    history: Option<&[ConversationTurn]>,
) -> GenerationRequest {
    let prompt = if context.trim().is_empty() {
        query.to_string()
    } else {
        grounded_prompt(query, context)
    };

    match history {
        None => GenerationRequest {
            system: Some(SINGLE_SHOT_SYSTEM_PROMPT.to_string()),
            history: Vec::new(),
            prompt,
            chat: false,
        },
        Some(turns) => {
            let start = turns.len().saturating_sub(MAX_HISTORY_TURNS);
            GenerationRequest {
                system: Some(CHAT_SYSTEM_PROMPT.to_string()),
                history: turns[start..].to_vec(),
                prompt,
                chat: true,
            }
        }
    }
}
