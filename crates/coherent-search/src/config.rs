//! Configuration for search retrieval

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Google Custom Search JSON API endpoint
pub const DEFAULT_GOOGLE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// DuckDuckGo instant answer endpoint
pub const DEFAULT_DUCKDUCKGO_ENDPOINT: &str = "https://api.duckduckgo.com/";

/// Configuration for the search retriever
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Primary provider endpoint
    pub endpoint: String,

    /// Keyless secondary provider endpoint
    pub fallback_endpoint: String,

    /// Maximum results requested from a provider
    pub result_limit: u32,

    /// Request timeout for every provider call (seconds)
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.result_limit == 0 {
            return Err("result_limit must be greater than 0".to_string());
        }
        if self.result_limit > 10 {
            return Err("result_limit cannot exceed 10 (provider maximum)".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        url::Url::parse(&self.endpoint).map_err(|e| format!("invalid endpoint: {}", e))?;
        url::Url::parse(&self.fallback_endpoint)
            .map_err(|e| format!("invalid fallback_endpoint: {}", e))?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GOOGLE_ENDPOINT.to_string(),
            fallback_endpoint: DEFAULT_DUCKDUCKGO_ENDPOINT.to_string(),
            result_limit: 8,
            timeout_secs: 8,
        }
    }
}

/// Credentials for the primary provider
///
/// Both values are required; with either missing the primary provider is
/// skipped entirely.
#[derive(Clone, Default)]
pub struct SearchCredentials {
    /// API key
    pub api_key: Option<String>,

    /// Search engine (context) identifier
    pub engine_id: Option<String>,
}

impl SearchCredentials {
    /// Environment variable holding the API key
    pub const API_KEY_VAR: &'static str = "GOOGLE_SEARCH_API_KEY";

    /// Environment variable holding the search engine id
    pub const ENGINE_ID_VAR: &'static str = "GOOGLE_SEARCH_ENGINE_ID";

    /// Create credentials from explicit values
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            engine_id: Some(engine_id.into()),
        }
    }

    /// Read credentials from the environment
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(Self::API_KEY_VAR).ok(),
            engine_id: std::env::var(Self::ENGINE_ID_VAR).ok(),
        }
    }

    /// Both secrets present and non-blank
    pub fn is_complete(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.api_key) && present(&self.engine_id)
    }
}

// Never print the secrets themselves
impl std::fmt::Debug for SearchCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCredentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("engine_id", &self.engine_id.as_ref().map(|_| "<set>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.result_limit, 8);
        assert_eq!(config.timeout(), Duration::from_secs(8));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = SearchConfig::default();
        config.result_limit = 0;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SearchConfig::from_toml("result_limit = 5").unwrap();
        assert_eq!(config.result_limit, 5);
        assert_eq!(config.endpoint, DEFAULT_GOOGLE_ENDPOINT);
    }

    #[test]
    fn test_credentials_completeness() {
        assert!(SearchCredentials::new("key", "cx").is_complete());
        assert!(!SearchCredentials::default().is_complete());
        assert!(!SearchCredentials {
            api_key: Some("key".to_string()),
            engine_id: Some(" ".to_string()),
        }
        .is_complete());
    }

    #[test]
    fn test_credentials_debug_hides_secrets() {
        let debug = format!("{:?}", SearchCredentials::new("sk-secret", "cx-secret"));
        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("cx-secret"));
    }
}
