//! Remote backend configuration

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// The public OpenAI endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for the remote OpenAI backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    /// API credential. Construction fails when empty.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default model applied when a request leaves it unset.
    #[serde(default = "default_model")]
    pub model: CompactString,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    /// Create a configuration with the given credential and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default model.
    pub fn with_model(mut self, model: impl Into<CompactString>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.into(),
            model: "gpt-4".into(),
            timeout_secs: 30,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_model() -> CompactString {
    "gpt-4".into()
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_openai() {
        let config = OpenAiConfig::new("sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn deserialize_fills_missing_fields() {
        let config: OpenAiConfig = serde_json::from_str(r#"{"api_key": "sk-test"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }
}
