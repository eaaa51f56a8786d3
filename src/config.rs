use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{AppError, Result};

/// Environment variable consulted when `llm.api_key` is not configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub article: ArticleConfig,
}

#[derive(Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_research_temperature")]
    pub research_temperature: f32,
    #[serde(default = "default_writing_temperature")]
    pub writing_temperature: f32,
}

// Manual Debug impl to avoid leaking the API key
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("research_temperature", &self.research_temperature)
            .field("writing_temperature", &self.writing_temperature)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            research_temperature: default_research_temperature(),
            writing_temperature: default_writing_temperature(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetcherConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_source_chars")]
    pub max_source_chars: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_source_chars: default_max_source_chars(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            extension: default_extension(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArticleConfig {
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_category")]
    pub default_category: String,
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            author: default_author(),
            default_category: default_category(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-5-mini-2025-08-07".to_string()
}

fn default_research_temperature() -> f32 {
    0.3
}

fn default_writing_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_max_source_chars() -> usize {
    10_000
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("content/articles")
}

fn default_extension() -> String {
    "mdx".to_string()
}

fn default_author() -> String {
    "FoxGlove CPA".to_string()
}

pub fn default_category() -> String {
    "Tax Planning".to_string()
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("scribe").required(false));
        }

        // Environment variable overrides with SCRIBE_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("SCRIBE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// The configured API key, falling back to `OPENAI_API_KEY`.
    pub fn api_key(&self) -> Option<String> {
        self.llm
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}
