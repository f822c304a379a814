//! Infrastructure layer for ollama-ensemble
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the Ollama chat-completion endpoint adapter and
//! configuration file loading.

pub mod config;
pub mod ollama;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileAgentConfig, FileConfig, FileSettings};
pub use ollama::OllamaEndpoint;
