// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Args;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use super::{result_count, ModelArgs};
use crate::config::AppConfig;
use crate::llm::{ChatHistory, ConversationTurn, LlmProvider};
use crate::pipeline::SearchPipeline;

/// Arguments for the chat command
#[derive(Args, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Search the web on every message
    #[arg(long, conflicts_with = "no_search")]
    pub search: bool,

    /// Search only when a message looks like a lookup
    #[arg(long)]
    pub no_search: bool,
}

/// One line of chat input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Message(String),
    Search(bool),
    Provider(LlmProvider),
    Clear,
    History,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

const HELP: &str = "Commands:
  /search on|off          search on every message, or only on lookups
  /provider openai|gemini switch model backend
  /history                show the retained turns
  /clear                  forget the conversation
  /quit                   leave";

/// Classify a line typed at the chat prompt
pub fn parse_chat_input(line: &str) -> ChatInput {
    let line = line.trim();
    if line.is_empty() {
        return ChatInput::Empty;
    }
    if !line.starts_with('/') {
        return ChatInput::Message(line.to_string());
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let arg = parts.next();
    match (command, arg) {
        ("/quit" | "/exit", _) => ChatInput::Quit,
        ("/clear", _) => ChatInput::Clear,
        ("/history", _) => ChatInput::History,
        ("/help", _) => ChatInput::Help,
        ("/search", Some("on")) => ChatInput::Search(true),
        ("/search", Some("off")) => ChatInput::Search(false),
        ("/provider", Some(name)) => match name.parse() {
            Ok(provider) => ChatInput::Provider(provider),
            Err(e) => ChatInput::Invalid(e.to_string()),
        },
        _ => ChatInput::Invalid(format!("unrecognized command: {}", line)),
    }
}

/// Interactive loop over stdin
pub async fn run(args: ChatArgs, config: &AppConfig) -> Result<()> {
    let mut pipeline = SearchPipeline::from_config(config, args.model.provider)?;
    let count = result_count(args.model.num_results, config);
    let mut search_enabled = if args.search {
        true
    } else if args.no_search {
        false
    } else {
        config.chat.search_enabled
    };
    let mut history = ChatHistory::new(config.chat.history_capacity);

    println!(
        "💬 Chatting with {} (web search {}). Type /help for commands.",
        pipeline.provider().display_name(),
        if search_enabled { "on" } else { "auto" }
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\nYou: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_chat_input(&line) {
            ChatInput::Empty => continue,
            ChatInput::Quit => break,
            ChatInput::Help => println!("{}", HELP),
            ChatInput::Clear => {
                history.clear();
                println!("🧹 Conversation cleared");
            }
            ChatInput::History => {
                for turn in history.iter() {
                    println!("{}: {}", turn.role, turn.content);
                }
            }
            ChatInput::Search(on) => {
                search_enabled = on;
                println!("🔍 Web search {}", if on { "on" } else { "auto" });
            }
            ChatInput::Provider(provider) => match SearchPipeline::from_config(config, provider) {
                Ok(next) => {
                    pipeline = next;
                    info!("Switched chat provider to {}", provider);
                    println!("🔁 Now using {}", provider.display_name());
                }
                Err(e) => println!("❌ {}", e),
            },
            ChatInput::Invalid(reason) => println!("❌ {}", reason),
            ChatInput::Message(text) => {
                let snapshot = history.snapshot();
                let reply = pipeline.chat(&text, &snapshot, search_enabled, count).await;

                if reply.searched {
                    println!("🔍 Searched the web");
                    if args.model.show_context && !reply.context.is_empty() {
                        println!("\n📄 Context:\n{}", reply.context);
                    }
                }
                println!("\n[Model: {}] {}", pipeline.provider().label(), reply.answer);

                history.push(ConversationTurn::user(text));
                history.push(ConversationTurn::assistant(reply.answer));
            }
        }
    }

    println!("👋 Bye");
    Ok(())
}
