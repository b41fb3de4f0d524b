// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod ask;
pub mod chat;
pub mod sources;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::context::clamp_num_results;
use crate::llm::LlmProvider;

/// Search the web, then ask an LLM
#[derive(Parser, Debug)]
#[command(name = "search-shell")]
#[command(version)]
#[command(about = "Answer questions from live web search results", long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./search-shell.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search, fetch the top pages and answer a single question
    Ask(ask::AskArgs),

    /// Interactive chat with optional web search
    Chat(chat::ChatArgs),

    /// List the pages a query would draw on
    Sources(sources::SourcesArgs),
}

/// Options shared by commands that call a model
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// LLM backend (openai or gemini)
    #[arg(long, default_value = "openai")]
    pub provider: LlmProvider,

    /// Number of search results to fetch (1-10)
    #[arg(short = 'n', long)]
    pub num_results: Option<usize>,

    /// Print the context document before the answer
    #[arg(long)]
    pub show_context: bool,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    dotenv::dotenv().ok();

    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Ask(args) => ask::run(args, &config).await,
        Commands::Chat(args) => chat::run(args, &config).await,
        Commands::Sources(args) => sources::run(args, &config).await,
    }
}

/// An explicit `--config` must exist; the default file is optional
fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load(path, true)?,
        None => AppConfig::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
    };
    Ok(config)
}

/// Requested result count, else the configured default, clamped to 1..=10
pub(crate) fn result_count(requested: Option<usize>, config: &AppConfig) -> usize {
    clamp_num_results(requested.unwrap_or(config.search.default_num_results))
}
