// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Args;

use super::{result_count, ModelArgs};
use crate::config::AppConfig;
use crate::pipeline::SearchPipeline;

/// Arguments for the ask command
#[derive(Args, Debug)]
pub struct AskArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// The question
    #[arg(required = true, trailing_var_arg = true)]
    pub words: Vec<String>,
}

impl AskArgs {
    pub fn query(&self) -> String {
        self.words.join(" ")
    }
}

/// Answer one question from fresh search results
pub async fn run(args: AskArgs, config: &AppConfig) -> Result<()> {
    let query = args.query();
    if query.trim().is_empty() {
        anyhow::bail!("query must not be empty");
    }

    let pipeline = SearchPipeline::from_config(config, args.model.provider)?;
    let count = result_count(args.model.num_results, config);

    println!("🔍 Searching the web for: {}", query);
    let result = pipeline.ask(&query, count).await;

    if args.model.show_context && !result.context.is_empty() {
        println!("\n📄 Context:\n{}", result.context);
    }
    println!("\n🤖 [Model: {}]\n{}", pipeline.provider().label(), result.answer);
    Ok(())
}
