//! Deterministic in-process backend
//!
//! Synthesizes canned replies keyed off the last user message with no
//! outbound call. Identical input yields an identical reply, so tests
//! can assert exact matches. Usage counters come from the same
//! 4-characters-per-token estimate the conversation summary uses.

use chrono::Utc;
use compact_str::CompactString;
use tcore::{
    Backend, BackendOptions, CancelToken, Choice, CompletionRequest, CompletionResponse, Error,
    FinishReason, Message, Result, Role, Usage,
};
use ulid::Ulid;

/// The mock backend.
#[derive(Clone, Debug)]
pub struct Mock {
    name: CompactString,
    model: CompactString,
}

impl Mock {
    /// Create a mock named "mock" with the default mock model.
    pub fn new() -> Self {
        Self {
            name: "mock".into(),
            model: "mock-model-v1".into(),
        }
    }

    /// Create a mock with a custom display name.
    pub fn named(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Replace the default model.
    pub fn set_default_model(&mut self, model: impl Into<CompactString>) {
        self.model = model.into();
    }

    /// Build the canned reply for a request.
    fn reply(request: &CompletionRequest) -> String {
        let last_user = request
            .messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .map(|message| message.content.as_str())
            .unwrap_or_default();
        let lowered = last_user.to_lowercase();

        if lowered.contains("joke") {
            "Why do programmers prefer dark mode? Because light attracts bugs.".to_owned()
        } else if lowered.contains("hello") {
            "Hello! How can I help you today?".to_owned()
        } else {
            format!(
                "This is a canned reply from {} to {} message(s).",
                request.model,
                request.messages.len()
            )
        }
    }
}

impl Backend for Mock {
    async fn chat_completion(
        &self,
        request: &CompletionRequest,
        cancel: &CancelToken,
    ) -> Result<CompletionResponse> {
        request.validate()?;
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let content = Self::reply(request);
        let prompt_tokens = prompt_tokens(&request.messages);
        let completion_tokens = approx_tokens(&content);
        Ok(CompletionResponse {
            id: format!("mock-{}", Ulid::new()),
            object: "chat.completion".to_owned(),
            created: Utc::now().timestamp() as u64,
            model: request.model.clone(),
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(content),
                finish_reason: Some(FinishReason::Stop),
            }],
            usage: Usage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
        })
    }

    async fn is_available(&self, _cancel: &CancelToken) -> bool {
        true
    }

    fn configure(&mut self, options: &BackendOptions) -> Result<()> {
        if let Some(model) = options.model.as_ref() {
            if !model.is_empty() {
                self.model = model.clone();
            }
        }
        Ok(())
    }

    fn name(&self) -> CompactString {
        self.name.clone()
    }

    fn default_model(&self) -> CompactString {
        self.model.clone()
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self::new()
    }
}

/// Rough 4-characters-per-token estimate for one text.
fn approx_tokens(text: &str) -> u32 {
    (text.chars().count() / 4).max(1) as u32
}

/// Prompt-side estimate over all message contents.
fn prompt_tokens(messages: &[Message]) -> u32 {
    let chars: usize = messages
        .iter()
        .map(|message| message.content.chars().count())
        .sum();
    (chars / 4).max(1) as u32
}
