//! `Controller`, the concurrent-safe conversation store and send loop

use crate::{
    ChatRequest, ChatResponse, ControllerConfig, Conversation, ConversationId,
    ConversationSummary,
};
use compact_str::CompactString;
use std::sync::{Arc, Mutex};
use tcore::{Backend, CancelToken, CompletionRequest, Error, Message, Result};

/// Owns every conversation and mediates every completion call.
///
/// All methods that read or mutate the store acquire the `Mutex`.
/// `send_message` appends the user message, releases the lock, performs
/// the backend call, then reacquires to append the reply, so one slow
/// call never blocks operations on other conversations.
pub struct Controller<B: Backend> {
    backend: B,
    config: ControllerConfig,
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    /// Live conversations in creation order.
    conversations: Vec<Conversation>,
    /// Conversations ever created, deletions included.
    created: usize,
}

/// Aggregate statistics over the controller's store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerStats {
    /// Messages currently held across live conversations.
    pub total_messages: usize,

    /// Conversations created over the controller's lifetime.
    pub total_conversations: usize,

    /// Display name of the backend in use.
    pub backend_name: CompactString,
}

impl<B: Backend> Controller<B> {
    /// Create a controller over the given backend.
    pub fn new(backend: B, config: ControllerConfig) -> Self {
        Self {
            backend,
            config,
            inner: Arc::new(Mutex::new(Inner {
                conversations: Vec::new(),
                created: 0,
            })),
        }
    }

    /// The backend in use.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create a conversation, seeded with a system message when a
    /// prompt is given. Returns a clone of the new record.
    pub fn create(&self, system_prompt: Option<&str>) -> Conversation {
        let conversation = Conversation::new(system_prompt);
        {
            let mut inner = self.inner.lock().expect("conversation lock poisoned");
            inner.conversations.push(conversation.clone());
            inner.created += 1;
        }
        tracing::debug!("conversation {} created", conversation.id);
        conversation
    }

    /// Get a clone of a conversation by id.
    pub fn get(&self, id: ConversationId) -> Result<Conversation> {
        let inner = self.inner.lock().expect("conversation lock poisoned");
        inner.find(id).cloned().ok_or_else(|| not_found(id))
    }

    /// List clones of all conversations in creation order.
    pub fn list(&self) -> Vec<Conversation> {
        let inner = self.inner.lock().expect("conversation lock poisoned");
        inner.conversations.clone()
    }

    /// Delete a conversation. Its id is invalid afterwards.
    pub fn delete(&self, id: ConversationId) -> Result<()> {
        {
            let mut inner = self.inner.lock().expect("conversation lock poisoned");
            let before = inner.conversations.len();
            inner.conversations.retain(|c| c.id != id);
            if inner.conversations.len() == before {
                return Err(not_found(id));
            }
        }
        tracing::debug!("conversation {id} deleted");
        Ok(())
    }

    /// Summarize a conversation's history.
    pub fn summary(&self, id: ConversationId) -> Result<ConversationSummary> {
        let inner = self.inner.lock().expect("conversation lock poisoned");
        inner
            .find(id)
            .map(Conversation::summary)
            .ok_or_else(|| not_found(id))
    }

    /// Aggregate statistics over the store.
    pub fn stats(&self) -> ControllerStats {
        let backend_name = self.backend.name();
        let inner = self.inner.lock().expect("conversation lock poisoned");
        ControllerStats {
            total_messages: inner.conversations.iter().map(Conversation::len).sum(),
            total_conversations: inner.created,
            backend_name,
        }
    }

    /// Send one user message in a conversation and append the reply.
    ///
    /// The user message stays appended even when the call fails, so the
    /// history always reflects what was sent. If the conversation is
    /// deleted while the call is in flight, the reply is discarded and
    /// `Error::NotFound` is returned.
    pub async fn send_message(
        &self,
        request: ChatRequest,
        cancel: &CancelToken,
    ) -> Result<ChatResponse> {
        let ChatRequest {
            conversation_id,
            message,
            model,
            max_tokens,
            temperature,
        } = request;

        let history = {
            let mut inner = self.inner.lock().expect("conversation lock poisoned");
            let conversation = inner
                .find_mut(conversation_id)
                .ok_or_else(|| not_found(conversation_id))?;
            conversation.messages.push(Message::user(message));
            conversation.messages.clone()
        };

        let completion = CompletionRequest {
            model: model.unwrap_or_else(|| self.config.default_model.clone()),
            messages: history,
            max_tokens: max_tokens.or(self.config.max_tokens),
            temperature: temperature.or(self.config.temperature),
            top_p: None,
            stream: false,
        };

        // No lock is held across the backend call.
        let response = self.backend.chat_completion(&completion, cancel).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Parse("no completion choices in response".into()))?;

        let mut inner = self.inner.lock().expect("conversation lock poisoned");
        let conversation = inner
            .find_mut(conversation_id)
            .ok_or_else(|| not_found(conversation_id))?;
        conversation.messages.push(choice.message.clone());

        Ok(ChatResponse {
            message: choice.message,
            usage: response.usage,
            model: response.model,
        })
    }
}

impl Inner {
    fn find(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    fn find_mut(&mut self, id: ConversationId) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }
}

fn not_found(id: ConversationId) -> Error {
    Error::NotFound(id.to_string().into())
}

impl<B: Backend> std::fmt::Debug for Controller<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().expect("conversation lock poisoned");
        f.debug_struct("Controller")
            .field("backend", &self.backend.name())
            .field("conversations", &inner.conversations.len())
            .finish()
    }
}

impl<B: Backend> Clone for Controller<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            config: self.config.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}
