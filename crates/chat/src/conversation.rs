//! Conversation records and summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tcore::{Message, Role};
use ulid::Ulid;

/// Opaque identifier for one conversation.
///
/// Backed by a ULID, so ids are unique for the lifetime of the store
/// and never reused after deletion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ConversationId(Ulid);

impl ConversationId {
    /// Allocate a fresh id.
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conv_{}", self.0)
    }
}

/// One conversation: an append-only message history.
#[derive(Debug, Clone)]
pub struct Conversation {
    /// The conversation id.
    pub id: ConversationId,

    /// The message history, oldest first.
    pub messages: Vec<Message>,

    /// When the conversation was created.
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create an empty conversation, seeded with a system message when
    /// a prompt is given.
    pub(crate) fn new(system_prompt: Option<&str>) -> Self {
        let messages = system_prompt
            .map(|prompt| vec![Message::system(prompt)])
            .unwrap_or_default();
        Self {
            id: ConversationId::new(),
            messages,
            created_at: Utc::now(),
        }
    }

    /// The number of messages in the history.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Scan the history into aggregate counts.
    pub fn summary(&self) -> ConversationSummary {
        let mut user_messages = 0;
        let mut assistant_messages = 0;
        let mut chars = 0;
        for message in &self.messages {
            match message.role {
                Role::User => user_messages += 1,
                Role::Assistant => assistant_messages += 1,
                Role::System => {}
            }
            chars += message.content.chars().count();
        }
        ConversationSummary {
            id: self.id,
            message_count: self.messages.len(),
            user_messages,
            assistant_messages,
            estimated_tokens: chars / 4,
        }
    }
}

/// Aggregate counts for one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    /// The conversation id.
    pub id: ConversationId,

    /// Total messages in the history, the system prompt included.
    pub message_count: usize,

    /// Messages authored by the user.
    pub user_messages: usize,

    /// Messages authored by the assistant.
    pub assistant_messages: usize,

    /// Rough token estimate over all message contents.
    pub estimated_tokens: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_prefixed() {
        let a = ConversationId::new();
        let b = ConversationId::new();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("conv_"));
    }

    #[test]
    fn id_serializes_as_plain_ulid() {
        let id = ConversationId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: ConversationId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
        assert!(!json.contains("conv_"));
    }

    #[test]
    fn system_prompt_seeds_history() {
        let seeded = Conversation::new(Some("You are terse."));
        assert_eq!(seeded.len(), 1);
        assert_eq!(seeded.messages[0].role, Role::System);

        let bare = Conversation::new(None);
        assert!(bare.is_empty());
        assert!(bare.last_message().is_none());
    }

    #[test]
    fn summary_counts_by_role() {
        let mut conversation = Conversation::new(Some("You are a helpful assistant."));
        conversation.messages.push(Message::user("Hello"));
        conversation.messages.push(Message::assistant("Hi there"));
        conversation.messages.push(Message::user("Tell me more"));

        let summary = conversation.summary();
        assert_eq!(summary.message_count, 4);
        assert_eq!(summary.user_messages, 2);
        assert_eq!(summary.assistant_messages, 1);
    }

    #[test]
    fn token_estimate_tracks_content_length() {
        let mut short = Conversation::new(None);
        short.messages.push(Message::user("Hi"));

        let mut long = Conversation::new(None);
        long.messages
            .push(Message::user("a considerably longer message body ".repeat(8)));

        assert!(long.summary().estimated_tokens > short.summary().estimated_tokens);
    }
}
