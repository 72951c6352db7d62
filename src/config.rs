use crate::extractors::AiAssistedExtractor;
use crate::providers::OpenAiClient;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Crate-wide import configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Language-model provider block. Absent (and no `OPENAI_API_KEY` in the
    /// environment) means the last-resort extractor is never constructed.
    #[serde(default)]
    pub ai: Option<AiProviderConfig>,
    /// Page-fetch timeout in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    /// Model-call timeout in seconds. Deliberately separate from the fetch
    /// timeout: completion latency has nothing to do with page latency.
    #[serde(default = "default_ai_timeout")]
    pub ai_timeout: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            ai: None,
            fetch_timeout: default_fetch_timeout(),
            ai_timeout: default_ai_timeout(),
        }
    }
}

/// Configuration for the language-model provider.
#[derive(Debug, Deserialize, Clone)]
pub struct AiProviderConfig {
    /// API key; falls back to the OPENAI_API_KEY environment variable.
    pub api_key: Option<String>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL for the API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AiProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_ai_timeout() -> u64 {
    60
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

impl ImportConfig {
    /// Load configuration from file and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables with MEALPLAN__ prefix
    /// 2. config.toml file in the current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEALPLAN__AI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("MEALPLAN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Assemble the last-resort extractor, or `None` when no credential is
    /// configured anywhere. The cascade treats `None` as "skip that stage".
    pub fn ai_extractor(&self) -> Option<AiAssistedExtractor> {
        let provider = self.ai.clone().unwrap_or_default();
        let api_key = provider
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())?;

        let client = OpenAiClient::new(api_key, &provider);
        Some(AiAssistedExtractor::new(
            Box::new(client),
            Duration::from_secs(self.ai_timeout),
        ))
    }
}
