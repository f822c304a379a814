//! Agent invoker: one round trip with timeout and bounded retry.
//!
//! The invoker never propagates an unrecovered fault to its caller. Every
//! outcome is returned by value as an [`Invocation`], so one failing endpoint
//! cannot destabilize the rest of a fan-out.
//!
//! The configured timeout applies to each attempt's whole round trip. On
//! timeout or connection failure the identical request is retried up to
//! `max_retries` additional times; protocol errors and malformed payloads
//! fail immediately. Elapsed time covers all attempts.

use crate::ports::chat_endpoint::{ChatEndpoint, EndpointError};
use ensemble_domain::{AgentConfig, Message, WorkerResult};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Why an invocation gave up
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationFailure {
    #[error("Timed out after {timeout:?} ({attempts} attempts)")]
    Timeout { timeout: Duration, attempts: u32 },

    #[error("Connection failed: {detail} ({attempts} attempts)")]
    Connection { detail: String, attempts: u32 },

    #[error("HTTP error {status}")]
    Protocol { status: u16 },

    #[error("Malformed response: {detail}")]
    MalformedResponse { detail: String },
}

/// Outcome of one agent invocation, returned by value
#[derive(Debug, Clone)]
pub enum Invocation {
    Success {
        content: String,
        elapsed: Duration,
    },
    Failure {
        kind: InvocationFailure,
        elapsed: Duration,
    },
}

impl Invocation {
    pub fn is_success(&self) -> bool {
        matches!(self, Invocation::Success { .. })
    }

    /// Wall time of the whole invocation including retries
    pub fn elapsed(&self) -> Duration {
        match self {
            Invocation::Success { elapsed, .. } | Invocation::Failure { elapsed, .. } => *elapsed,
        }
    }

    /// Fold this outcome into the per-worker result entity.
    pub fn into_worker_result(self, agent_name: impl Into<String>) -> WorkerResult {
        match self {
            Invocation::Success { content, elapsed } => {
                WorkerResult::success(agent_name, content, elapsed.as_secs_f64())
            }
            Invocation::Failure { kind, elapsed } => {
                WorkerResult::failure(agent_name, kind.to_string(), elapsed.as_secs_f64())
            }
        }
    }
}

/// Perform one conversational request against a configured endpoint.
///
/// `messages` must be non-empty and `agent.timeout` positive; both are
/// enforced upstream by [`ensemble_domain::Conversation`] and
/// [`ensemble_domain::EnsembleAgents::validate`].
pub async fn invoke_agent<E>(endpoint: &E, agent: &AgentConfig, messages: &[Message]) -> Invocation
where
    E: ChatEndpoint + ?Sized,
{
    let start = Instant::now();
    let max_attempts = agent.max_retries.saturating_add(1);
    let mut attempt = 0u32;

    let kind = loop {
        attempt += 1;
        debug!(
            agent = %agent.name,
            model = %agent.model,
            attempt,
            max_attempts,
            "Sending request"
        );

        match tokio::time::timeout(agent.timeout, endpoint.chat(agent, messages)).await {
            Ok(Ok(content)) => {
                debug!(agent = %agent.name, elapsed = ?start.elapsed(), "Response received");
                return Invocation::Success {
                    content,
                    elapsed: start.elapsed(),
                };
            }
            Ok(Err(error)) if error.is_transient() && attempt < max_attempts => {
                warn!(agent = %agent.name, %error, attempt, "Transient failure, retrying");
            }
            Ok(Err(EndpointError::Connection(detail))) => {
                break InvocationFailure::Connection {
                    detail,
                    attempts: attempt,
                };
            }
            Ok(Err(EndpointError::Protocol { status })) => {
                break InvocationFailure::Protocol { status };
            }
            Ok(Err(EndpointError::MalformedResponse(detail))) => {
                break InvocationFailure::MalformedResponse { detail };
            }
            Err(_) if attempt < max_attempts => {
                warn!(agent = %agent.name, timeout = ?agent.timeout, attempt, "Timed out, retrying");
            }
            Err(_) => {
                break InvocationFailure::Timeout {
                    timeout: agent.timeout,
                    attempts: attempt,
                };
            }
        }
    };

    warn!(agent = %agent.name, error = %kind, "Invocation failed");
    Invocation::Failure {
        kind,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ensemble_domain::AgentRole;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// One scripted endpoint behavior per attempt
    enum Step {
        Reply(&'static str),
        Fail(EndpointError),
        /// Never completes within any timeout
        Hang,
    }

    struct ScriptedEndpoint {
        steps: Mutex<VecDeque<Step>>,
    }

    impl ScriptedEndpoint {
        fn new(steps: Vec<Step>) -> Self {
            Self {
                steps: Mutex::new(steps.into()),
            }
        }

        fn remaining(&self) -> usize {
            self.steps.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatEndpoint for ScriptedEndpoint {
        async fn chat(
            &self,
            _agent: &AgentConfig,
            _messages: &[Message],
        ) -> Result<String, EndpointError> {
            let step = self.steps.lock().unwrap().pop_front();
            match step {
                Some(Step::Reply(text)) => Ok(text.to_string()),
                Some(Step::Fail(error)) => Err(error),
                Some(Step::Hang) | None => {
                    tokio::time::sleep(Duration::from_secs(86_400)).await;
                    Err(EndpointError::Connection("hung".into()))
                }
            }
        }
    }

    fn test_agent(max_retries: u32) -> AgentConfig {
        AgentConfig::new(
            "Worker A",
            "http://localhost:11434/api/chat",
            "llama3:8b",
            AgentRole::Worker,
        )
        .with_timeout(Duration::from_secs(60))
        .with_max_retries(max_retries)
    }

    fn prompt() -> Vec<Message> {
        vec![Message::user("hello")]
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt() {
        let endpoint = ScriptedEndpoint::new(vec![Step::Reply("hi")]);
        let outcome = invoke_agent(&endpoint, &test_agent(1), &prompt()).await;
        match outcome {
            Invocation::Success { content, .. } => assert_eq!(content, "hi"),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_then_success_within_retry_budget() {
        let endpoint = ScriptedEndpoint::new(vec![Step::Hang, Step::Reply("second try")]);
        let outcome = invoke_agent(&endpoint, &test_agent(1), &prompt()).await;
        assert!(outcome.is_success());
        // Elapsed includes the full timed-out first attempt
        assert!(outcome.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_twice_exhausts_retry_budget() {
        let endpoint = ScriptedEndpoint::new(vec![Step::Hang, Step::Hang, Step::Reply("late")]);
        let outcome = invoke_agent(&endpoint, &test_agent(1), &prompt()).await;
        match outcome {
            Invocation::Failure {
                kind: InvocationFailure::Timeout { attempts, .. },
                elapsed,
            } => {
                assert_eq!(attempts, 2);
                assert!(elapsed >= Duration::from_secs(120));
            }
            other => panic!("expected timeout failure, got {:?}", other),
        }
        // The third scripted step was never consumed
        assert_eq!(endpoint.remaining(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connection_error_is_retried() {
        let endpoint = ScriptedEndpoint::new(vec![
            Step::Fail(EndpointError::Connection("refused".into())),
            Step::Reply("recovered"),
        ]);
        let outcome = invoke_agent(&endpoint, &test_agent(1), &prompt()).await;
        assert!(outcome.is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_protocol_error_is_never_retried() {
        let endpoint = ScriptedEndpoint::new(vec![
            Step::Fail(EndpointError::Protocol { status: 500 }),
            Step::Reply("should not be reached"),
        ]);
        let outcome = invoke_agent(&endpoint, &test_agent(3), &prompt()).await;
        match outcome {
            Invocation::Failure {
                kind: InvocationFailure::Protocol { status },
                ..
            } => assert_eq!(status, 500),
            other => panic!("expected protocol failure, got {:?}", other),
        }
        assert_eq!(endpoint.remaining(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_response_is_never_retried() {
        let endpoint = ScriptedEndpoint::new(vec![
            Step::Fail(EndpointError::MalformedResponse("no content field".into())),
            Step::Reply("should not be reached"),
        ]);
        let outcome = invoke_agent(&endpoint, &test_agent(3), &prompt()).await;
        assert!(!outcome.is_success());
        assert_eq!(endpoint.remaining(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_fails_on_first_timeout() {
        let endpoint = ScriptedEndpoint::new(vec![Step::Hang]);
        let outcome = invoke_agent(&endpoint, &test_agent(0), &prompt()).await;
        match outcome {
            Invocation::Failure {
                kind: InvocationFailure::Timeout { attempts, .. },
                ..
            } => assert_eq!(attempts, 1),
            other => panic!("expected timeout failure, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_folds_into_worker_result() {
        let endpoint = ScriptedEndpoint::new(vec![Step::Fail(EndpointError::Protocol {
            status: 404,
        })]);
        let outcome = invoke_agent(&endpoint, &test_agent(0), &prompt()).await;
        let result = outcome.into_worker_result("Worker A");
        assert!(!result.is_success);
        assert!(result.content.is_empty());
        assert!(result.error.unwrap().contains("404"));
    }
}
