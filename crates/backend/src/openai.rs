//! Remote OpenAI-compatible backend
//!
//! One outbound POST per completion through a shared `reqwest::Client`
//! with pre-built bearer headers. The configured client timeout surfaces
//! as a transport failure; only the caller's token produces `Cancelled`.

use crate::OpenAiConfig;
use compact_str::CompactString;
use reqwest::{
    Client, Method,
    header::{self, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use std::{fmt, time::Duration};
use tcore::{
    Backend, BackendOptions, CancelToken, CompletionRequest, CompletionResponse, Error, Result,
};

/// The remote OpenAI backend.
///
/// Holds a shared `reqwest::Client`, pre-built headers, and the
/// configuration they were derived from. Clones share the client;
/// `configure` rebuilds it.
#[derive(Clone)]
pub struct OpenAi {
    client: Client,
    headers: HeaderMap,
    config: OpenAiConfig,
}

impl OpenAi {
    /// Create a backend from the given configuration.
    ///
    /// Fails with a validation error when the credential is empty.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::validation("api_key is required"));
        }
        let (client, headers) = build_transport(&config)?;
        Ok(Self {
            client,
            headers,
            config,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Replace the default model.
    pub fn set_default_model(&mut self, model: impl Into<CompactString>) {
        self.config.model = model.into();
    }

    /// List the models available from the provider.
    pub async fn models(&self, cancel: &CancelToken) -> Result<Vec<ModelInfo>> {
        let call = async {
            let url = format!("{}/models", self.config.base_url);
            let response = self
                .client
                .request(Method::GET, &url)
                .headers(self.headers.clone())
                .send()
                .await
                .map_err(|e| Error::transport(e.to_string()))?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| Error::transport(e.to_string()))?;
            if !status.is_success() {
                tracing::debug!("api error ({status}): {text}");
                return Err(api_error(status.as_u16(), &text));
            }

            let listing: ModelListing = serde_json::from_str(&text)?;
            Ok(listing.data)
        };

        race(cancel, call).await
    }

    async fn completion_call(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        tracing::trace!(
            "request: {}",
            serde_json::to_string(request).unwrap_or_default()
        );
        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .client
            .request(Method::POST, &url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        if !status.is_success() {
            tracing::debug!("api error ({status}): {text}");
            return Err(api_error(status.as_u16(), &text));
        }

        tracing::trace!("response: {text}");
        serde_json::from_str(&text).map_err(Into::into)
    }
}

impl Backend for OpenAi {
    async fn chat_completion(
        &self,
        request: &CompletionRequest,
        cancel: &CancelToken,
    ) -> Result<CompletionResponse> {
        request.validate()?;
        race(cancel, self.completion_call(request)).await
    }

    async fn is_available(&self, cancel: &CancelToken) -> bool {
        let probe = async {
            self.client
                .request(Method::GET, format!("{}/models", self.config.base_url))
                .headers(self.headers.clone())
                .send()
                .await
                .map(|response| response.status().is_success())
                .unwrap_or(false)
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            available = probe => available,
        }
    }

    fn configure(&mut self, options: &BackendOptions) -> Result<()> {
        if let Some(api_key) = options.api_key.as_deref() {
            if !api_key.is_empty() {
                self.config.api_key = api_key.to_owned();
            }
        }
        if let Some(base_url) = options.base_url.as_deref() {
            if !base_url.is_empty() {
                self.config.base_url = base_url.to_owned();
            }
        }
        if let Some(model) = options.model.as_ref() {
            if !model.is_empty() {
                self.config.model = model.clone();
            }
        }
        if let Some(timeout_secs) = options.timeout_secs {
            self.config.timeout_secs = timeout_secs;
        }

        if self.config.api_key.is_empty() {
            return Err(Error::validation("api_key is required"));
        }
        let (client, headers) = build_transport(&self.config)?;
        self.client = client;
        self.headers = headers;
        Ok(())
    }

    fn name(&self) -> CompactString {
        "openai".into()
    }

    fn default_model(&self) -> CompactString {
        self.config.model.clone()
    }
}

impl fmt::Debug for OpenAi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAi")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish_non_exhaustive()
    }
}

/// A model entry from the provider's catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    /// The model identifier.
    pub id: CompactString,

    /// The object type.
    #[serde(default)]
    pub object: String,

    /// Unix timestamp (in seconds) of when the model was created.
    #[serde(default)]
    pub created: u64,

    /// The organization owning the model.
    #[serde(default)]
    pub owned_by: String,
}

#[derive(Deserialize)]
struct ModelListing {
    data: Vec<ModelInfo>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Race a call against the cancellation token.
async fn race<T>(cancel: &CancelToken, call: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = call => result,
    }
}

/// Map a non-success reply to a transport error, preferring the
/// provider's own error message when the body parses.
fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => Error::status(status, parsed.error.message),
        Err(_) => Error::status(status, body.trim().to_owned()),
    }
}

fn build_transport(config: &OpenAiConfig) -> Result<(Client, HeaderMap)> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| Error::transport(e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        header::AUTHORIZATION,
        format!("Bearer {}", config.api_key)
            .parse()
            .map_err(|_| Error::validation("api_key contains invalid header characters"))?,
    );
    Ok((client, headers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_credential() {
        let err = OpenAi::new(OpenAiConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn api_error_prefers_provider_message() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;
        match api_error(401, body) {
            Error::Transport { status, message } => {
                assert_eq!(status, Some(401));
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        match api_error(502, "Bad Gateway") {
            Error::Transport { status, message } => {
                assert_eq!(status, Some(502));
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
