//! Chat completion request types

use crate::{Error, Message, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A chat completion request.
///
/// Carries the full message history for one completion call. Optional
/// sampling fields serialize only when set, so unset and zero stay
/// distinguishable on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompletionRequest {
    /// The model to use.
    pub model: CompactString,

    /// The conversation messages, oldest first.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// The maximum number of tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// The sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// The nucleus sampling probability mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Whether to stream the response. Always false here.
    #[serde(default)]
    pub stream: bool,
}

impl CompletionRequest {
    /// Create a new request for the given model.
    pub fn new(model: impl Into<CompactString>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            stream: false,
        }
    }

    /// Set the messages for this request.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Set the max token budget for this request.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature for this request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the nucleus sampling parameter for this request.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Check the request is complete enough to send.
    ///
    /// Backends call this before any outbound IO.
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(Error::validation("model is required"));
        }
        if self.messages.is_empty() {
            return Err(Error::validation("messages are required"));
        }
        Ok(())
    }
}

/// A flat single-shot request.
///
/// The original client surface: one bag of fields with no conversation
/// state. The send adapter fills the backend's default model when it is
/// left unset and unwraps the first choice into a `SendResponse`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendRequest {
    /// The model to use; the backend default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<CompactString>,

    /// The messages to send, oldest first.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// The maximum number of tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// The sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// The nucleus sampling probability mass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl SendRequest {
    /// Create a request from a list of messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            model: None,
            messages,
            max_tokens: None,
            temperature: None,
            top_p: None,
        }
    }

    /// Set an explicit model, overriding the backend default.
    pub fn with_model(mut self, model: impl Into<CompactString>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the max token budget for this request.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature for this request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
