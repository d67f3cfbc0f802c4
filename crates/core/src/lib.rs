//! Core types and traits for the Tern chat client

pub use {
    backend::{Backend, BackendOptions},
    cancel::CancelToken,
    error::{Error, Result},
    message::{Message, Role},
    request::{CompletionRequest, SendRequest},
    response::{Choice, CompletionResponse, FinishReason, SendResponse, Usage},
};

mod backend;
mod cancel;
mod error;
mod message;
mod request;
mod response;
