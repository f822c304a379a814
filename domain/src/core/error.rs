//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No worker agents configured")]
    NoWorkers,

    #[error("Conversation is empty")]
    EmptyConversation,

    #[error("Conversation must end with a user message")]
    ConversationMustEndWithUser,

    #[error("Message content is empty")]
    EmptyMessage,

    #[error("Invalid agent configuration: {0}")]
    InvalidAgent(String),
}
