//! Error types shared by backends and the conversation controller

use compact_str::CompactString;
use thiserror::Error;

/// Result alias defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures produced by backends and the conversation controller.
///
/// The controller propagates backend failures unchanged, so callers
/// match on one enum regardless of where a call failed.
#[derive(Debug, Error)]
pub enum Error {
    /// The request is malformed or incomplete. Caller's fault, never
    /// retried.
    #[error("invalid request: {0}")]
    Validation(String),

    /// No conversation exists under the given id.
    #[error("conversation not found: {0}")]
    NotFound(CompactString),

    /// The outbound call failed or the provider answered with a
    /// non-success status.
    #[error("transport error: {message}")]
    Transport {
        /// HTTP status, when the provider answered at all.
        status: Option<u16>,
        /// Provider-supplied error message, or the transport failure text.
        message: String,
    },

    /// The provider reply could not be interpreted.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The call was aborted through its cancellation token.
    #[error("request cancelled")]
    Cancelled,
}

impl Error {
    /// Validation failure with the given reason.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    /// Transport failure without an HTTP status (network-level).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Transport failure carrying the provider's HTTP status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
