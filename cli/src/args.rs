//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for ensemble results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every worker answer and the critique
    Full,
    /// Only the synthesized final answer
    Answer,
    /// JSON output (the same shape the engine returns to API callers)
    Json,
}

/// CLI arguments for ollama-ensemble
#[derive(Parser, Debug)]
#[command(name = "ollama-ensemble")]
#[command(author, version, about = "Multi-agent ensemble - parallel workers, one reviewer")]
#[command(long_about = r#"
ollama-ensemble sends one question to several worker models in parallel,
then asks a reviewer model to critique their answers and synthesize a
single final answer.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./ensemble.toml       Project-level config
3. ~/.config/ollama-ensemble/config.toml   Global config

Example:
  ollama-ensemble "What's the best way to handle errors in Rust?"
  ollama-ensemble --output full "Compare async/await patterns"
  ollama-ensemble --list-agents
"#)]
pub struct Cli {
    /// The question to send to the ensemble
    pub question: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "answer")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the configured agents and exit
    #[arg(long)]
    pub list_agents: bool,
}
