//! Agent configuration entities
//!
//! An agent is one configured model endpoint. Workers answer the user's
//! prompt independently; the single reviewer critiques and merges their
//! answers. Configurations are immutable for the lifetime of a request and
//! may be shared across concurrent requests without synchronization.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Role an agent plays in the ensemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Queried in parallel for an independent answer
    Worker,
    /// Receives the successful worker answers and produces the final answer
    Reviewer,
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentRole::Worker => write!(f, "worker"),
            AgentRole::Reviewer => write!(f, "reviewer"),
        }
    }
}

/// Configuration for a single model endpoint (Entity)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Display name, used for logging and attribution in the review prompt
    pub name: String,
    /// Chat API endpoint URL (e.g. `http://localhost:11434/api/chat`)
    pub endpoint_url: String,
    /// Model identifier (e.g. `llama3:8b`)
    pub model: String,
    /// Timeout for one round trip, connect plus response
    pub timeout: Duration,
    /// Additional attempts after a transient failure
    pub max_retries: u32,
    /// Role of this agent in the ensemble
    pub role: AgentRole,
}

impl AgentConfig {
    pub fn new(
        name: impl Into<String>,
        endpoint_url: impl Into<String>,
        model: impl Into<String>,
        role: AgentRole,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint_url: endpoint_url.into(),
            model: model.into(),
            timeout: Duration::from_secs(60),
            max_retries: 1,
            role,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// The full agent roster for one request: one reviewer, ordered workers
#[derive(Debug, Clone)]
pub struct EnsembleAgents {
    pub reviewer: AgentConfig,
    pub workers: Vec<AgentConfig>,
}

impl EnsembleAgents {
    pub fn new(reviewer: AgentConfig, workers: Vec<AgentConfig>) -> Self {
        Self { reviewer, workers }
    }

    /// Validate the roster: at least one worker, non-empty names and models
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.workers.is_empty() {
            return Err(DomainError::NoWorkers);
        }
        for agent in std::iter::once(&self.reviewer).chain(self.workers.iter()) {
            if agent.name.trim().is_empty() {
                return Err(DomainError::InvalidAgent("agent name is empty".into()));
            }
            if agent.model.trim().is_empty() {
                return Err(DomainError::InvalidAgent(format!(
                    "agent '{}' has no model",
                    agent.name
                )));
            }
            if agent.timeout.is_zero() {
                return Err(DomainError::InvalidAgent(format!(
                    "agent '{}' has a zero timeout",
                    agent.name
                )));
            }
        }
        Ok(())
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }
}
