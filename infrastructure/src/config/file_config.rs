//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file:
//! a `[reviewer]` table, an ordered list of `[[workers]]`, and a `[settings]`
//! table of system-wide defaults applied when an individual agent omits a
//! field. `into_agents` validates the file and produces the domain roster.

use ensemble_domain::{AgentConfig, AgentRole, EnsembleAgents};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Allowed per-call timeout range, in seconds
const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=600;

/// Errors produced while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("No [reviewer] configured")]
    MissingReviewer,

    #[error("At least one [[workers]] entry is required")]
    NoWorkers,

    #[error("Agent '{agent}': {field} must not be empty")]
    EmptyField { agent: String, field: &'static str },

    #[error("Agent '{agent}': endpoint_url '{url}' must start with http:// or https://")]
    InvalidEndpointUrl { agent: String, url: String },

    #[error("Agent '{agent}': timeout_secs {secs} is outside 1..=600")]
    TimeoutOutOfRange { agent: String, secs: u64 },
}

/// One agent entry in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAgentConfig {
    /// Display name
    pub name: String,
    /// Chat API endpoint URL
    pub endpoint_url: String,
    /// Model identifier (e.g. `llama3:8b`)
    pub model: String,
    /// Per-call timeout; falls back to `settings.default_timeout_secs`
    pub timeout_secs: Option<u64>,
    /// Retry budget; falls back to `settings.max_retries`
    pub max_retries: Option<u32>,
    /// Free-form description, not used by the engine
    pub description: Option<String>,
}

impl FileAgentConfig {
    fn into_agent(self, role: AgentRole, settings: &FileSettings) -> Result<AgentConfig, ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                agent: format!("<unnamed {role}>"),
                field: "name",
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                agent: self.name,
                field: "model",
            });
        }
        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            return Err(ConfigError::InvalidEndpointUrl {
                agent: self.name,
                url: self.endpoint_url,
            });
        }
        let timeout_secs = self.timeout_secs.unwrap_or(settings.default_timeout_secs);
        if !TIMEOUT_RANGE_SECS.contains(&timeout_secs) {
            return Err(ConfigError::TimeoutOutOfRange {
                agent: self.name,
                secs: timeout_secs,
            });
        }

        Ok(
            AgentConfig::new(self.name, self.endpoint_url, self.model, role)
                .with_timeout(Duration::from_secs(timeout_secs))
                .with_max_retries(self.max_retries.unwrap_or(settings.max_retries)),
        )
    }
}

/// System-wide defaults from the `[settings]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Default retry budget for agents that omit `max_retries`
    pub max_retries: u32,
    /// Default per-call timeout for agents that omit `timeout_secs`
    pub default_timeout_secs: u64,
    /// Streaming flag; the engine only supports non-streaming calls
    pub stream: bool,
    /// Log level used when no filter is given on the command line
    pub log_level: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            max_retries: 1,
            default_timeout_secs: 60,
            stream: false,
            log_level: "info".to_string(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// The single reviewer agent
    pub reviewer: Option<FileAgentConfig>,
    /// Worker agents, in dispatch order
    pub workers: Vec<FileAgentConfig>,
    /// System-wide defaults
    pub settings: FileSettings,
}

impl FileConfig {
    /// Validate the file and produce the domain agent roster.
    pub fn into_agents(self) -> Result<EnsembleAgents, ConfigError> {
        let reviewer_entry = self.reviewer.ok_or(ConfigError::MissingReviewer)?;
        if self.workers.is_empty() {
            return Err(ConfigError::NoWorkers);
        }
        if self.settings.stream {
            warn!("settings.stream = true is not supported; calls are sent with stream = false");
        }

        let reviewer = reviewer_entry.into_agent(AgentRole::Reviewer, &self.settings)?;
        let workers = self
            .workers
            .into_iter()
            .map(|w| w.into_agent(AgentRole::Worker, &self.settings))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EnsembleAgents::new(reviewer, workers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CONFIG: &str = r#"
[reviewer]
name = "Reviewer (Llama 3 70B)"
endpoint_url = "http://localhost:11435/api/chat"
model = "llama3:70b"
timeout_secs = 120

[[workers]]
name = "Worker A (Llama 3 8B)"
endpoint_url = "http://localhost:11434/api/chat"
model = "llama3:8b"

[[workers]]
name = "Worker B (Mistral)"
endpoint_url = "http://localhost:11436/api/chat"
model = "mistral"
timeout_secs = 30
max_retries = 2

[settings]
max_retries = 1
default_timeout_secs = 60
log_level = "debug"
"#;

    #[test]
    fn test_deserialize_full_config() {
        let config: FileConfig = toml::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.workers.len(), 2);
        assert_eq!(config.settings.log_level, "debug");
        assert_eq!(
            config.reviewer.as_ref().unwrap().model,
            "llama3:70b"
        );
    }

    #[test]
    fn test_defaults_fill_omitted_agent_fields() {
        let config: FileConfig = toml::from_str(FULL_CONFIG).unwrap();
        let agents = config.into_agents().unwrap();

        // Worker A omitted both fields, so settings defaults apply
        assert_eq!(agents.workers[0].timeout, Duration::from_secs(60));
        assert_eq!(agents.workers[0].max_retries, 1);
        // Worker B set both explicitly
        assert_eq!(agents.workers[1].timeout, Duration::from_secs(30));
        assert_eq!(agents.workers[1].max_retries, 2);
        // Reviewer timeout came from its own entry
        assert_eq!(agents.reviewer.timeout, Duration::from_secs(120));
        assert_eq!(agents.reviewer.role, AgentRole::Reviewer);
    }

    #[test]
    fn test_worker_order_is_preserved() {
        let config: FileConfig = toml::from_str(FULL_CONFIG).unwrap();
        let agents = config.into_agents().unwrap();
        assert_eq!(agents.workers[0].name, "Worker A (Llama 3 8B)");
        assert_eq!(agents.workers[1].name, "Worker B (Mistral)");
    }

    #[test]
    fn test_missing_reviewer_is_rejected() {
        let config: FileConfig = toml::from_str(
            r#"
[[workers]]
name = "W"
endpoint_url = "http://localhost:11434/api/chat"
model = "llama3:8b"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.into_agents(),
            Err(ConfigError::MissingReviewer)
        ));
    }

    #[test]
    fn test_empty_worker_list_is_rejected() {
        let config: FileConfig = toml::from_str(
            r#"
[reviewer]
name = "R"
endpoint_url = "http://localhost:11435/api/chat"
model = "llama3:70b"
"#,
        )
        .unwrap();
        assert!(matches!(config.into_agents(), Err(ConfigError::NoWorkers)));
    }

    #[test]
    fn test_non_http_endpoint_is_rejected() {
        let config: FileConfig = toml::from_str(
            r#"
[reviewer]
name = "R"
endpoint_url = "http://localhost:11435/api/chat"
model = "llama3:70b"

[[workers]]
name = "W"
endpoint_url = "localhost:11434/api/chat"
model = "llama3:8b"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.into_agents(),
            Err(ConfigError::InvalidEndpointUrl { .. })
        ));
    }

    #[test]
    fn test_timeout_out_of_range_is_rejected() {
        let config: FileConfig = toml::from_str(
            r#"
[reviewer]
name = "R"
endpoint_url = "http://localhost:11435/api/chat"
model = "llama3:70b"

[[workers]]
name = "W"
endpoint_url = "http://localhost:11434/api/chat"
model = "llama3:8b"
timeout_secs = 0
"#,
        )
        .unwrap();
        assert!(matches!(
            config.into_agents(),
            Err(ConfigError::TimeoutOutOfRange { secs: 0, .. })
        ));
    }

    #[test]
    fn test_default_settings() {
        let settings = FileSettings::default();
        assert_eq!(settings.max_retries, 1);
        assert_eq!(settings.default_timeout_secs, 60);
        assert!(!settings.stream);
        assert_eq!(settings.log_level, "info");
    }
}
