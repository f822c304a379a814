//! Ollama chat API adapter

pub mod endpoint;
pub mod protocol;

pub use endpoint::OllamaEndpoint;
pub use protocol::{ChatRequest, ChatResponse, WireMessage};
