//! Unified provider enum over the concrete backends

use crate::{Mock, OpenAi, OpenAiConfig};
use compact_str::CompactString;
use tcore::{
    Backend, BackendOptions, CancelToken, CompletionRequest, CompletionResponse, Result,
};

/// The available backends as one dispatchable type.
///
/// Code that is generic over [`Backend`] works with either variant
/// directly; callers that pick a backend at runtime hold a `Provider`.
#[derive(Clone, Debug)]
pub enum Provider {
    /// Remote OpenAI-compatible API.
    OpenAi(OpenAi),
    /// Deterministic in-process mock.
    Mock(Mock),
}

impl Provider {
    /// Build a provider from the environment.
    ///
    /// Uses the remote backend when `OPENAI_API_KEY` is set and
    /// non-empty, the mock otherwise.
    pub fn from_env() -> Result<Self> {
        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.is_empty() => {
                let backend = OpenAi::new(OpenAiConfig::new(key))?;
                Ok(Self::OpenAi(backend))
            }
            _ => {
                tracing::warn!("OPENAI_API_KEY not set, using the mock backend");
                Ok(Self::Mock(Mock::new()))
            }
        }
    }
}

impl Backend for Provider {
    async fn chat_completion(
        &self,
        request: &CompletionRequest,
        cancel: &CancelToken,
    ) -> Result<CompletionResponse> {
        match self {
            Self::OpenAi(backend) => backend.chat_completion(request, cancel).await,
            Self::Mock(backend) => backend.chat_completion(request, cancel).await,
        }
    }

    async fn is_available(&self, cancel: &CancelToken) -> bool {
        match self {
            Self::OpenAi(backend) => backend.is_available(cancel).await,
            Self::Mock(backend) => backend.is_available(cancel).await,
        }
    }

    fn configure(&mut self, options: &BackendOptions) -> Result<()> {
        match self {
            Self::OpenAi(backend) => backend.configure(options),
            Self::Mock(backend) => backend.configure(options),
        }
    }

    fn name(&self) -> CompactString {
        match self {
            Self::OpenAi(backend) => backend.name(),
            Self::Mock(backend) => backend.name(),
        }
    }

    fn default_model(&self) -> CompactString {
        match self {
            Self::OpenAi(backend) => backend.default_model(),
            Self::Mock(backend) => backend.default_model(),
        }
    }
}
