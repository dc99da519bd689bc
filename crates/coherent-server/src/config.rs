//! Configuration file parsing for the server.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. Secrets are never read from here, only from the
//! environment.

use coherent_llm::openai::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use coherent_search::SearchConfig;
use coherent_synthesizer::SynthesisConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A section failed validation
    #[error("Invalid [{section}] configuration: {message}")]
    Invalid {
        /// Section name
        section: &'static str,
        /// What is wrong
        message: String,
    },
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoherentConfig {
    /// HTTP listener
    pub server: ServerConfig,
    /// Search retrieval
    pub search: SearchConfig,
    /// Language model endpoint
    pub llm: LlmConfig,
    /// Sampling settings
    pub synthesis: SynthesisConfig,
    /// Query history
    pub history: HistoryConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port
    pub bind_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 5000,
        }
    }
}

/// Upper bound on attempts per language model call
pub const MAX_LLM_RETRIES: u32 = 10;

/// OpenAI-compatible endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API base URL, without the `/chat/completions` suffix
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Request timeout (seconds)
    pub timeout_secs: u64,

    /// Attempts per call for transient failures
    pub max_retries: u32,
}

impl LlmConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url).map_err(|e| format!("invalid base_url: {}", e))?;
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if !(1..=MAX_LLM_RETRIES).contains(&self.max_retries) {
            return Err(format!("max_retries must be between 1 and {}", MAX_LLM_RETRIES));
        }
        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Where completed queries are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    /// Process memory, lost on restart
    #[default]
    Memory,
    /// SQLite file at `sqlite_path`
    Sqlite,
}

/// Query history settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Records returned by the recent-searches endpoint without a limit
    pub default_limit: usize,

    /// Storage backend
    pub backend: HistoryBackend,

    /// Database file for the sqlite backend
    pub sqlite_path: PathBuf,
}

impl HistoryConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_limit == 0 {
            return Err("default_limit must be greater than 0".to_string());
        }
        if self.backend == HistoryBackend::Sqlite && self.sqlite_path.as_os_str().is_empty() {
            return Err("sqlite_path is required for the sqlite backend".to_string());
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            backend: HistoryBackend::Memory,
            sqlite_path: PathBuf::from("coherent.db"),
        }
    }
}

impl CoherentConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: CoherentConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate().map_err(invalid("search"))?;
        self.llm.validate().map_err(invalid("llm"))?;
        self.synthesis.validate().map_err(invalid("synthesis"))?;
        self.history.validate().map_err(invalid("history"))?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.bind_port)
    }
}

fn invalid(section: &'static str) -> impl FnOnce(String) -> ConfigError {
    move |message| ConfigError::Invalid { section, message }
}
