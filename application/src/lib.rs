//! Application layer for ollama-ensemble
//!
//! This crate contains the orchestration engine: the agent invoker, the
//! fan-out coordinator, reviewer invocation, and result composition. It
//! depends only on the domain layer; network adapters implement the
//! [`ChatEndpoint`] port from the infrastructure layer.

pub mod invoker;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use invoker::{Invocation, InvocationFailure, invoke_agent};
pub use ports::{
    chat_endpoint::{ChatEndpoint, EndpointError},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::run_ensemble::{RunEnsembleError, RunEnsembleInput, RunEnsembleUseCase};
