//! Configuration for synthesis and language detection

use coherent_domain::GenerationOptions;
use serde::{Deserialize, Serialize};

/// Model sampling settings for the two LLM calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Sampling temperature for answer synthesis
    pub temperature: f32,

    /// Output ceiling for answer synthesis (tokens)
    pub max_tokens: u32,

    /// Output ceiling for language detection (tokens)
    pub detect_max_tokens: u32,
}

impl SynthesisConfig {
    /// Options for the answer synthesis call
    pub fn synthesis_options(&self) -> GenerationOptions {
        GenerationOptions::new(self.temperature, self.max_tokens)
    }

    /// Options for the language detection call (always temperature 0)
    pub fn detection_options(&self) -> GenerationOptions {
        GenerationOptions::new(0.0, self.detect_max_tokens)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if self.detect_max_tokens == 0 {
            return Err("detect_max_tokens must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 512,
            detect_max_tokens: 10,
        }
    }
}
