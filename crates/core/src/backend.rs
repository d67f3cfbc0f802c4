//! Backend capability shared by all providers

use crate::{
    CancelToken, CompletionRequest, CompletionResponse, Error, Result, SendRequest, SendResponse,
};
use chrono::DateTime;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A provider of chat completions, real or simulated.
///
/// Completion calls take a [`CancelToken`]; implementations race the
/// outbound work against it and return `Error::Cancelled` when it fires
/// first. Constructors are inherent methods on each provider.
pub trait Backend: Clone + Send + Sync {
    /// Produce a completion for the given request.
    ///
    /// The request is validated before any outbound call.
    fn chat_completion(
        &self,
        request: &CompletionRequest,
        cancel: &CancelToken,
    ) -> impl Future<Output = Result<CompletionResponse>> + Send;

    /// Best-effort liveness probe. Never errors.
    fn is_available(&self, cancel: &CancelToken) -> impl Future<Output = bool> + Send;

    /// Apply recognized runtime options.
    fn configure(&mut self, options: &BackendOptions) -> Result<()>;

    /// The backend's display name, for diagnostics and stats.
    fn name(&self) -> CompactString;

    /// The model applied when a request leaves it unset.
    fn default_model(&self) -> CompactString;

    /// Send a flat request and unwrap the first choice.
    ///
    /// Fills the backend's default model when the request leaves it
    /// unset, then delegates to [`Backend::chat_completion`].
    fn send_message(
        &self,
        request: SendRequest,
        cancel: &CancelToken,
    ) -> impl Future<Output = Result<SendResponse>> + Send {
        async move {
            let completion = CompletionRequest {
                model: request.model.unwrap_or_else(|| self.default_model()),
                messages: request.messages,
                max_tokens: request.max_tokens,
                temperature: request.temperature,
                top_p: request.top_p,
                stream: false,
            };
            let response = self.chat_completion(&completion, cancel).await?;
            let choice = response
                .choices
                .into_iter()
                .next()
                .ok_or_else(|| Error::Parse("no completion choices in response".into()))?;
            Ok(SendResponse {
                content: choice.message.content,
                tokens_used: response.usage.total_tokens,
                model: response.model,
                created: DateTime::from_timestamp(response.created as i64, 0)
                    .unwrap_or(DateTime::UNIX_EPOCH),
            })
        }
    }
}

/// Recognized runtime configuration updates for a backend.
///
/// A set and non-empty value updates the matching field; anything else
/// leaves the current value untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackendOptions {
    /// Replacement API credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Replacement base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Replacement default model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<CompactString>,

    /// Replacement request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl BackendOptions {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the default model.
    pub fn with_model(mut self, model: impl Into<CompactString>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}
