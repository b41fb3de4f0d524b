// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Whole pipeline: local search results, local pages, stand-in LLM

use reqwest::Client;
use search_shell::config::{AppConfig, ConfigError};
use search_shell::llm::{
    ChatHistory, ConversationTurn, GeminiConfig, GeminiGenerator, LlmProvider, OpenAiConfig,
    OpenAiGenerator, NO_CONTEXT_NOTICE,
};
use search_shell::pipeline::SearchPipeline;
use std::io::Write;
use tempfile::NamedTempFile;

use super::support::{
    context_builder, gemini_reply, local_content_config, openai_reply, serve_pages, MockLlm,
};

async fn openai_pipeline(urls: Vec<String>, mock: &MockLlm) -> SearchPipeline {
    let config = OpenAiConfig {
        base_url: mock.start().await,
        ..Default::default()
    };
    let generator = OpenAiGenerator::new(Client::new(), "sk-test", config);
    SearchPipeline::new(
        context_builder(urls, local_content_config()),
        Box::new(generator),
    )
}

#[tokio::test]
async fn test_capital_of_france() {
    let base = serve_pages().await;
    let slow = format!("{}/slow", base);
    let article = format!("{}/article", base);
    let mock = MockLlm::replying(openai_reply("Paris is the capital of France. 🇫🇷"));
    let pipeline = openai_pipeline(vec![slow.clone(), article.clone()], &mock).await;

    let result = pipeline.ask("What is the capital of France?", 2).await;

    assert_eq!(result.answer, "Paris is the capital of France. 🇫🇷");
    assert!(result.context.starts_with(&format!("Source: {}\n", slow)));
    assert!(result.context.contains("Source: Paris Facts"));

    let requests = mock.take();
    assert_eq!(requests.len(), 1);
    let prompt = requests[0].body["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains(&result.context));
    assert!(prompt.contains("Paris is the capital of France."));
    assert!(prompt.contains("What is the capital of France?"));
}

#[tokio::test]
async fn test_no_results_asks_bare_question() {
    let mock = MockLlm::replying(openai_reply("Probably Paris."));
    let pipeline = openai_pipeline(Vec::new(), &mock).await;

    let result = pipeline.ask("capital of France", 3).await;

    assert_eq!(result.context, "");
    assert_eq!(result.answer, format!("{}\n\nProbably Paris.", NO_CONTEXT_NOTICE));
    let requests = mock.take();
    assert_eq!(requests[0].body["messages"][1]["content"], "capital of France");
}

#[tokio::test]
async fn test_chat_turns_with_bounded_history() {
    let base = serve_pages().await;
    let mock = MockLlm::replying(gemini_reply("Noted! 😊"));
    let config = GeminiConfig {
        base_url: mock.start().await,
        ..Default::default()
    };
    let pipeline = SearchPipeline::new(
        context_builder(vec![format!("{}/article", base)], local_content_config()),
        Box::new(GeminiGenerator::new(Client::new(), "g-key", config)),
    );
    assert_eq!(pipeline.provider(), LlmProvider::Gemini);

    let mut history = ChatHistory::new(4);
    for input in ["hello", "how are you", "tell me a joke"] {
        let snapshot = history.snapshot();
        let reply = pipeline.chat(input, &snapshot, false, 1).await;
        assert!(!reply.searched);
        history.push(ConversationTurn::user(input));
        history.push(ConversationTurn::assistant(reply.answer));
    }

    assert_eq!(history.len(), 4);
    let kept: Vec<_> = history.iter().map(|t| t.content.clone()).collect();
    assert_eq!(kept, vec!["how are you", "Noted! 😊", "tell me a joke", "Noted! 😊"]);

    // lookup phrasing triggers a search even with the toggle off
    let reply = pipeline
        .chat("who is the mayor of Paris", &history.snapshot(), false, 1)
        .await;
    assert!(reply.searched);
    assert!(reply.context.contains("Paris Facts"));

    let requests = mock.take();
    assert_eq!(requests.len(), 4);
    let last = requests[3].body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(last.contains("User: how are you"));
    // the searched turn carries the grounded prompt as its user line
    assert!(last.contains("User: Context from web searches:"));
    assert!(last.contains("Question: who is the mayor of Paris"));
    assert!(last.ends_with("\nAssistant: "));
    assert!(!last.contains("User: hello\n"));
}

#[tokio::test]
async fn test_sources_lists_titles() {
    let base = serve_pages().await;
    let mock = MockLlm::replying(openai_reply("unused"));
    let pipeline = openai_pipeline(
        vec![format!("{}/article", base), format!("{}/untitled", base)],
        &mock,
    )
    .await;

    let sources = pipeline.sources("paris", 2).await;
    assert_eq!(sources[0].title, "Paris Facts");
    assert_eq!(sources[1].title, format!("{}/untitled", base));
    assert!(mock.take().is_empty());
}

#[test]
fn test_missing_key_fails_before_any_work() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[gemini]\napi_key = \"\"").unwrap();
    let text = std::fs::read_to_string(file.path()).unwrap();
    let config = AppConfig::from_toml_str(&text).unwrap();

    let result = SearchPipeline::from_config(&config, LlmProvider::Gemini);
    assert!(matches!(
        result,
        Err(ConfigError::MissingApiKey {
            provider: LlmProvider::Gemini,
            ..
        })
    ));
}
