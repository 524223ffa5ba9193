//! Chat transcript state.
//!
//! `ChatSession` owns the ordered list of turns. It never talks to the
//! network itself: [`ChatSession::send`] records the user turn and hands back
//! a [`ChatRequest`] for a worker to deliver, and [`ChatSession::receive`]
//! records whatever came back. Every send produces exactly one assistant
//! turn, so a failed exchange is never silently dropped.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Assistant text recorded when a chat exchange fails.
pub const CHAT_ERROR_PLACEHOLDER: &str = "Error: Could not get a response.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }

    /// `true` for the assistant placeholder written after a failed exchange.
    pub fn is_error_placeholder(&self) -> bool {
        self.role == Role::Assistant && self.content == CHAT_ERROR_PLACEHOLDER
    }
}

/// A message waiting to be delivered to the chat service.
///
/// Only the latest user text travels; the transcript stays client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// Session generation the message belongs to.
    pub generation: u64,
    pub message: String,
}

/// Append-only transcript plus bookkeeping for replies still in flight.
#[derive(Debug, Default)]
pub struct ChatSession {
    turns: Vec<Turn>,
    generation: u64,
    awaiting: usize,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of sent messages whose reply has not arrived yet.
    pub fn awaiting_replies(&self) -> usize {
        self.awaiting
    }

    /// Records a user turn and returns the request to deliver.
    ///
    /// Returns `None`, leaving the transcript untouched, when `text` is empty
    /// or whitespace only.
    pub fn send(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() {
            return None;
        }
        self.turns.push(Turn::user(text));
        self.awaiting += 1;
        Some(ChatRequest { generation: self.generation, message: text.to_owned() })
    }

    /// Records the assistant turn for a finished exchange.
    ///
    /// Replies tagged with an older generation (sent before the last
    /// [`reset`](Self::reset)) are discarded. Returns whether a turn was appended.
    pub fn receive(&mut self, generation: u64, outcome: Result<String, ServiceError>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale chat reply");
            return false;
        }
        self.awaiting = self.awaiting.saturating_sub(1);
        let content = match outcome {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "chat exchange failed");
                CHAT_ERROR_PLACEHOLDER.to_owned()
            }
        };
        self.turns.push(Turn::assistant(content));
        true
    }

    /// Empties the transcript and invalidates replies still in flight.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.awaiting = 0;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_messages_are_ignored() {
        let mut chat = ChatSession::new();
        assert!(chat.send("").is_none());
        assert!(chat.send("   ").is_none());
        assert!(chat.send("\t\n").is_none());
        assert!(chat.is_empty());
        assert_eq!(chat.awaiting_replies(), 0);
    }

    #[test]
    fn successful_exchange_appends_user_then_assistant() {
        let mut chat = ChatSession::new();
        let req = chat.send("hello").unwrap();
        assert_eq!(req.message, "hello");
        assert_eq!(chat.turns(), &[Turn::user("hello")]);
        assert_eq!(chat.awaiting_replies(), 1);

        assert!(chat.receive(req.generation, Ok("Hi, how are you feeling?".into())));
        assert_eq!(
            chat.turns(),
            &[Turn::user("hello"), Turn::assistant("Hi, how are you feeling?")]
        );
        assert_eq!(chat.awaiting_replies(), 0);
    }

    #[test]
    fn failed_exchange_appends_placeholder() {
        let mut chat = ChatSession::new();
        let req = chat.send("hello").unwrap();
        chat.receive(req.generation, Err(ServiceError::Decode("missing field".into())));
        assert_eq!(
            chat.turns(),
            &[Turn::user("hello"), Turn::assistant("Error: Could not get a response.")]
        );
        assert!(chat.turns()[1].is_error_placeholder());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut chat = ChatSession::new();
        let req = chat.send("hello").unwrap();
        chat.receive(req.generation, Ok("hi".into()));
        chat.reset();
        assert!(chat.is_empty());
        chat.reset();
        assert!(chat.is_empty());
        assert_eq!(chat.awaiting_replies(), 0);
    }

    #[test]
    fn replies_from_before_reset_are_dropped() {
        let mut chat = ChatSession::new();
        let stale = chat.send("first").unwrap();
        chat.reset();
        assert!(!chat.receive(stale.generation, Ok("late".into())));
        assert!(chat.is_empty());
    }

    #[test]
    fn queued_sends_keep_fifo_order() {
        let mut chat = ChatSession::new();
        let a = chat.send("one").unwrap();
        let b = chat.send("two").unwrap();
        chat.receive(a.generation, Ok("reply one".into()));
        chat.receive(b.generation, Ok("reply two".into()));
        let contents: Vec<_> = chat.turns().iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "reply one", "reply two"]);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Turn::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"ok"}"#);
    }
}
