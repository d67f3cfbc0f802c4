//! Controller request and response types

use crate::ConversationId;
use compact_str::CompactString;
use tcore::{Message, Usage};

/// A request to send one user message in a conversation.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The target conversation.
    pub conversation_id: ConversationId,

    /// The user message text.
    pub message: String,

    /// Override the controller's default model for this call.
    pub model: Option<CompactString>,

    /// Override the configured token budget for this call.
    pub max_tokens: Option<u32>,

    /// Override the configured temperature for this call.
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Create a request carrying the given message text.
    pub fn new(conversation_id: ConversationId, message: impl Into<String>) -> Self {
        Self {
            conversation_id,
            message: message.into(),
            model: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Override the model for this call.
    pub fn with_model(mut self, model: impl Into<CompactString>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the token budget for this call.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Override the temperature for this call.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// The assistant's reply to one [`ChatRequest`].
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The assistant message appended to the conversation.
    pub message: Message,

    /// Token usage reported for the completion call.
    pub usage: Usage,

    /// The model that produced the reply.
    pub model: CompactString,
}
