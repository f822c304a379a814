//! Configuration loading and validation

pub mod file_config;
pub mod loader;

pub use file_config::{ConfigError, FileAgentConfig, FileConfig, FileSettings};
pub use loader::ConfigLoader;
