//! Chat endpoint port
//!
//! Defines the interface for one chat-completion round trip to a configured
//! model endpoint. Implementations (adapters) live in the infrastructure
//! layer; the invoker in [`crate::invoker`] layers timeout and retry on top.

use async_trait::async_trait;
use ensemble_domain::{AgentConfig, Message};
use thiserror::Error;

/// Errors that can occur during a single endpoint round trip
///
/// The transient/permanent distinction drives the invoker's retry decision:
/// connection-level faults may be retried, protocol errors and malformed
/// payloads never are.
#[derive(Error, Debug)]
pub enum EndpointError {
    /// Connection refused/reset, DNS failure, or transport-level timeout
    #[error("Connection error: {0}")]
    Connection(String),

    /// The endpoint answered with a non-2xx status
    #[error("HTTP error {status}")]
    Protocol { status: u16 },

    /// The body was not the expected chat-completion shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl EndpointError {
    /// Whether retrying the identical request could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, EndpointError::Connection(_))
    }
}

/// One conversational round trip to a configured endpoint
///
/// Implementations issue outbound network requests only and hold no mutable
/// shared state, so a single adapter instance may serve concurrent requests.
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Send the message sequence to the agent's endpoint and return the
    /// generated text.
    async fn chat(
        &self,
        agent: &AgentConfig,
        messages: &[Message],
    ) -> Result<String, EndpointError>;
}
