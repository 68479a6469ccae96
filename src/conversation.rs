//! In-memory conversation state.
//!
//! Messages are append-only. A conversation is either idle or awaiting exactly
//! one reply; `submit` moves it to `AwaitingReply` and `complete` moves it back.

use crate::ai::InferenceBackend;
use crate::config::ChatConfig;
use crate::error::{ChatError, ChatResult};
use crate::types::ChatMessage;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingReply,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    phase: Phase,
    show_errors: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            phase: Phase::Idle,
            show_errors: false,
        }
    }

    /// A conversation seeded with the configured greeting.
    pub fn from_config(config: &ChatConfig) -> Self {
        let mut conversation = Self::new().with_error_notices(config.show_errors);
        if let Some(greeting) = &config.greeting {
            conversation.append(ChatMessage::assistant_note(greeting.clone()));
        }
        conversation
    }

    pub fn with_error_notices(mut self, enabled: bool) -> Self {
        self.show_errors = enabled;
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::AwaitingReply
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Records the user's message and returns the prompt to send.
    pub fn submit(&mut self, text: impl Into<String>) -> ChatResult<String> {
        if self.is_pending() {
            return Err(ChatError::Busy);
        }
        let text = text.into();
        self.append(ChatMessage::outgoing(text.clone()));
        self.phase = Phase::AwaitingReply;
        Ok(text)
    }

    /// Applies the outcome of the pending request.
    pub fn complete(&mut self, outcome: ChatResult<String>) -> ChatResult<()> {
        if !self.is_pending() {
            return Err(ChatError::NotPending);
        }
        self.phase = Phase::Idle;
        match outcome {
            Ok(raw) => self.append(ChatMessage::reply(raw)),
            Err(err) => {
                tracing::error!(%err, "inference request failed");
                if self.show_errors {
                    self.append(ChatMessage::notice(failure_notice(&err)));
                }
            }
        }
        Ok(())
    }
}

fn failure_notice(err: &ChatError) -> String {
    format!("Could not get a reply: {err}")
}

/// Runs one full exchange. A failed request is recorded in the conversation
/// and also returned so the caller can react to it.
pub async fn send(
    conversation: &mut Conversation,
    backend: &dyn InferenceBackend,
    text: impl Into<String>,
) -> ChatResult<()> {
    let prompt = conversation.submit(text)?;
    let outcome = backend.generate(&prompt).await;
    let failure = outcome.as_ref().err().cloned();
    conversation.complete(outcome)?;
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
