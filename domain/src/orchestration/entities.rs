//! Orchestration domain entities

use serde::{Deserialize, Serialize};

/// Phase of an ensemble run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// All workers answer the prompt in parallel
    FanOut,
    /// The reviewer critiques the successful answers and synthesizes one
    Review,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::FanOut => "fan_out",
            Phase::Review => "review",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::FanOut => "Worker Fan-Out",
            Phase::Review => "Review",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
