//! Controller configuration

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Defaults applied by the controller to every completion call.
///
/// Per-request overrides on a `ChatRequest` take precedence over these.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControllerConfig {
    /// Model used when a request leaves it unset.
    #[serde(default = "default_model")]
    pub default_model: CompactString,

    /// Token budget applied to completions, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature applied to completions, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ControllerConfig {
    /// Create a configuration with the given default model.
    pub fn new(default_model: impl Into<CompactString>) -> Self {
        Self {
            default_model: default_model.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set the token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(default_model())
    }
}

fn default_model() -> CompactString {
    "gpt-4".into()
}
