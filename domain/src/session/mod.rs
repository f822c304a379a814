//! Conversation entities
//!
//! A request carries an ordered message sequence. Worker and reviewer calls
//! each receive their own derived sequence; nothing here persists across
//! requests.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A validated conversation: non-empty, ending with a user message
///
/// The final user message is the prompt the ensemble answers; earlier
/// user/assistant turns are carried as history.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Build a single-turn conversation from one prompt
    pub fn from_prompt(prompt: impl Into<String>) -> Result<Self, DomainError> {
        Self::from_messages(vec![Message::user(prompt)])
    }

    /// Build from a full message history; the last message must be from the user
    pub fn from_messages(messages: Vec<Message>) -> Result<Self, DomainError> {
        let Some(last) = messages.last() else {
            return Err(DomainError::EmptyConversation);
        };
        if last.role != Role::User {
            return Err(DomainError::ConversationMustEndWithUser);
        }
        if messages.iter().any(|m| m.content.trim().is_empty()) {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self { messages })
    }

    /// All messages, in order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The final user prompt
    pub fn latest_prompt(&self) -> &str {
        // Invariant: the list is non-empty and ends with a user message
        &self.messages[self.messages.len() - 1].content
    }

    /// Prior user/assistant turns, excluding the final prompt
    pub fn history(&self) -> impl Iterator<Item = &Message> {
        self.messages[..self.messages.len() - 1]
            .iter()
            .filter(|m| matches!(m.role, Role::User | Role::Assistant))
    }
}
