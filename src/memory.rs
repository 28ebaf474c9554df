//! Conversation history storage
//!
//! In-memory, per-conversation history of patient and assistant turns.
//! Discarded with the engine instance: there is deliberately no
//! cross-restart persistence of patient records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    /// Role string used on the chat completion wire
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

/// A single message in the conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub message_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub role: MessageRole,
    pub content: String,
}

impl ConversationMessage {
    pub fn new(role: MessageRole, content: String) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            role,
            content,
        }
    }
}

/// Conversation history for one consultation session
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    messages: VecDeque<ConversationMessage>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::new(),
        }
    }

    /// Record a turn in the history
    pub fn add(&mut self, role: MessageRole, content: &str) {
        self.messages
            .push_back(ConversationMessage::new(role, content.to_string()));
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The N most recent messages, oldest first, cloned for use as backend
    /// context while the history itself keeps accepting new turns.
    pub fn recent(&self, n: usize) -> Vec<ConversationMessage> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).cloned().collect()
    }
}
