//! Chat completion response types

use crate::Message;
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::Deserialize;

/// A chat completion response from the provider
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// A unique identifier for the completion
    #[serde(default)]
    pub id: String,

    /// The object type
    #[serde(default)]
    pub object: String,

    /// Unix timestamp (in seconds) of when the response was created
    #[serde(default)]
    pub created: u64,

    /// The model that produced the completion
    pub model: CompactString,

    /// The list of completion choices
    pub choices: Vec<Choice>,

    /// Token usage statistics
    pub usage: Usage,
}

impl CompletionResponse {
    /// Get the first choice's message
    pub fn message(&self) -> Option<&Message> {
        self.choices.first().map(|choice| &choice.message)
    }

    /// Get the first choice's message content
    pub fn content(&self) -> Option<&str> {
        self.message().map(|message| message.content.as_str())
    }
}

/// A completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The index of this choice in the list
    #[serde(default)]
    pub index: u32,

    /// The generated message
    pub message: Message,

    /// The reason the model stopped generating
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// The reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model finished naturally
    Stop,

    /// The model hit the max token limit
    Length,

    /// Content was filtered
    ContentFilter,

    /// The model asked for tool calls
    ToolCalls,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,

    /// Number of tokens in the completion
    pub completion_tokens: u32,

    /// Total number of tokens used
    pub total_tokens: u32,
}

/// A flat single-shot reply, paired with `SendRequest`.
#[derive(Debug, Clone)]
pub struct SendResponse {
    /// The first choice's message content.
    pub content: String,

    /// Total tokens consumed by the call.
    pub tokens_used: u32,

    /// The model that produced the reply.
    pub model: CompactString,

    /// When the provider created the completion.
    pub created: DateTime<Utc>,
}
