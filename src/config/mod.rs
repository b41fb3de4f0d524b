// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Application configuration
//!
//! A single TOML file with one section per component. Every field has a
//! default, so an absent file or section yields a working configuration
//! apart from API keys. Environment variables override file values.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::llm::{GeminiConfig, LlmProvider, OpenAiConfig, DEFAULT_HISTORY_CAPACITY};
use crate::search::{ContentFetchConfig, SearchConfig};

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "search-shell.toml";

/// Configuration failures; the only errors that stop a run
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("missing API key for {provider}; set {env_var} or [{provider}].api_key")]
    MissingApiKey {
        provider: LlmProvider,
        env_var: &'static str,
    },

    #[error("unknown LLM provider '{0}'; expected openai or gemini")]
    UnknownProvider(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// `[chat]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Turns kept in the interactive history
    pub history_capacity: usize,
    /// Initial state of the always-search toggle
    pub search_enabled: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            search_enabled: false,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub openai: OpenAiConfig,
    pub gemini: GeminiConfig,
    pub search: SearchConfig,
    pub content: ContentFetchConfig,
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Parse TOML text; no environment overrides
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            reason: e.to_string(),
        })
    }

    /// Load `path`, apply environment overrides and validate
    ///
    /// A missing file is only an error when `required` is set; otherwise
    /// defaults are used.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            let config: AppConfig = toml::from_str(&text).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            info!("Loaded configuration from {}", path.display());
            config
        } else if required {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        } else {
            debug!("No config file at {}; using defaults", path.display());
            AppConfig::default()
        };

        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides to every section
    pub fn with_env_overrides(self) -> Self {
        Self {
            openai: self.openai.with_env_overrides(),
            gemini: self.gemini.with_env_overrides(),
            search: self.search.with_env_overrides(),
            content: self.content.with_env_overrides(),
            chat: self.chat,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate().map_err(ConfigError::Invalid)?;
        self.content.validate().map_err(ConfigError::Invalid)?;
        if self.openai.timeout_ms == 0 || self.gemini.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "LLM timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.chat.history_capacity == 0 {
            return Err(ConfigError::Invalid(
                "chat.history_capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// API key for `provider`, rejecting missing and blank keys
    pub fn api_key(&self, provider: LlmProvider) -> Result<&str, ConfigError> {
        let key = match provider {
            LlmProvider::OpenAi => self.openai.api_key.as_deref(),
            LlmProvider::Gemini => self.gemini.api_key.as_deref(),
        };
        match key.map(str::trim) {
            Some(k) if !k.is_empty() => Ok(k),
            _ => Err(ConfigError::MissingApiKey {
                provider,
                env_var: provider.api_key_var(),
            }),
        }
    }
}
