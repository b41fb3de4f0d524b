// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Args;

use super::result_count;
use crate::config::AppConfig;
use crate::pipeline::context_builder;

/// Arguments for the sources command
#[derive(Args, Debug)]
pub struct SourcesArgs {
    /// Number of search results to list (1-10)
    #[arg(short = 'n', long)]
    pub num_results: Option<usize>,

    /// The search query
    #[arg(required = true, trailing_var_arg = true)]
    pub words: Vec<String>,
}

/// Print title and URL of each result; needs no LLM key
pub async fn run(args: SourcesArgs, config: &AppConfig) -> Result<()> {
    let query = args.words.join(" ");
    let builder = context_builder(config)?;
    let count = result_count(args.num_results, config);

    let sources = builder.list_sources(&query, count).await;
    if sources.is_empty() {
        println!("No results for: {}", query);
        return Ok(());
    }

    for (i, source) in sources.iter().enumerate() {
        println!("{}. {}\n   {}", i + 1, source.title, source.url);
    }
    Ok(())
}
