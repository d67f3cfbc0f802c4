//! Conversation management for Tern
//!
//! [`Controller`] owns conversation histories, drives completion calls
//! through any [`tcore::Backend`], and reports per-conversation
//! summaries and aggregate statistics.

pub use {
    config::ControllerConfig,
    controller::{Controller, ControllerStats},
    conversation::{Conversation, ConversationId, ConversationSummary},
    request::{ChatRequest, ChatResponse},
};

mod config;
mod controller;
mod conversation;
mod request;
