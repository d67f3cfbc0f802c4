//! Chat completion backends for Tern
//!
//! Two implementations of the `tern-core` [`Backend`](tcore::Backend)
//! capability: a remote OpenAI-compatible provider and a deterministic
//! in-process mock, plus a [`Provider`] enum unifying them for runtime
//! selection.

pub use {
    config::{DEFAULT_BASE_URL, OpenAiConfig},
    mock::Mock,
    openai::{ModelInfo, OpenAi},
    provider::Provider,
};

mod config;
mod mock;
mod openai;
mod provider;
