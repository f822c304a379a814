//! Ollama endpoint adapter
//!
//! Implements the [`ChatEndpoint`] port over HTTP. One adapter instance holds
//! a single `reqwest::Client` whose connection pool is safe for concurrent
//! use, so the same instance serves every agent and every caller request.
//!
//! The adapter performs exactly one round trip per call; timeout and retry
//! are layered on top by the application-layer invoker. Transport faults map
//! to transient errors, non-2xx statuses to protocol errors, and unexpected
//! bodies to malformed-response errors, which drives the retry policy.

use crate::ollama::protocol::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use ensemble_application::ports::chat_endpoint::{ChatEndpoint, EndpointError};
use ensemble_domain::{AgentConfig, Message};
use tracing::debug;

/// HTTP adapter for Ollama-compatible chat endpoints
pub struct OllamaEndpoint {
    client: reqwest::Client,
}

impl OllamaEndpoint {
    /// Create an adapter with a fresh connection pool.
    ///
    /// No client-level timeout is set; the invoker applies each agent's
    /// configured timeout to the whole round trip.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for OllamaEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatEndpoint for OllamaEndpoint {
    async fn chat(
        &self,
        agent: &AgentConfig,
        messages: &[Message],
    ) -> Result<String, EndpointError> {
        let request = ChatRequest::new(&agent.model, messages);
        debug!(
            agent = %agent.name,
            url = %agent.endpoint_url,
            model = %agent.model,
            messages = messages.len(),
            "POST chat request"
        );

        let response = self
            .client
            .post(&agent.endpoint_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EndpointError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EndpointError::Protocol {
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| EndpointError::MalformedResponse(e.to_string()))?;

        body.into_content()
            .ok_or_else(|| EndpointError::MalformedResponse("missing message.content".to_string()))
    }
}
