//! Domain layer for ollama-ensemble
//!
//! This crate contains the core business logic, entities, and value objects
//! of the multi-agent ensemble flow. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Ensemble
//!
//! One user prompt is dispatched to several **worker agents** in parallel.
//! Their answers are then handed to a single **reviewer agent**, which
//! critiques them and synthesizes one final answer.
//!
//! - **Fan-out**: concurrent dispatch of the same request to all workers
//! - **Review**: the reviewer receives only the successful worker answers
//! - **Degraded mode**: a reviewer reply without the expected structure is
//!   treated as a bare final answer

pub mod agent;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod review;
pub mod session;

// Re-export commonly used types
pub use agent::{AgentConfig, AgentRole, EnsembleAgents};
pub use core::error::DomainError;
pub use orchestration::{
    entities::Phase,
    value_objects::{EnsembleResponse, ResponseMetadata, ReviewOutcome, WorkerResult},
};
pub use prompt::{FINAL_ANSWER_HEADING, REVIEW_HEADING, ReviewPromptTemplate};
pub use review::{ReviewSplit, parse_review_reply};
pub use session::{Conversation, Message, Role};
