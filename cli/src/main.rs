//! CLI entrypoint for ollama-ensemble
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod args;
mod output;
mod progress;

use anyhow::{Context, Result, bail};
use args::{Cli, OutputFormat};
use clap::Parser;
use ensemble_application::{RunEnsembleInput, RunEnsembleUseCase};
use ensemble_domain::Conversation;
use ensemble_infrastructure::{ConfigLoader, OllamaEndpoint};
use output::ConsoleFormatter;
use progress::ProgressReporter;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };

    // Initialize logging: -v flags override the configured log level
    let filter = match cli.verbose {
        0 => EnvFilter::new(file_config.settings.log_level.clone()),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let agents = file_config
        .into_agents()
        .context("invalid agent configuration (see ensemble.example.toml)")?;

    if cli.list_agents {
        println!(
            "Reviewer: {} ({}) @ {}",
            agents.reviewer.name, agents.reviewer.model, agents.reviewer.endpoint_url
        );
        println!("Workers:");
        for (i, worker) in agents.workers.iter().enumerate() {
            println!(
                "  {}. {} ({}) @ {}",
                i + 1,
                worker.name,
                worker.model,
                worker.endpoint_url
            );
        }
        return Ok(());
    }

    let Some(question) = cli.question else {
        bail!("Question is required (or use --list-agents / --show-config)");
    };

    info!(
        reviewer = %agents.reviewer.name,
        workers = agents.worker_count(),
        "Starting ollama-ensemble"
    );
    for worker in &agents.workers {
        info!("  worker: {} ({})", worker.name, worker.model);
    }

    // === Dependency Injection ===
    let endpoint = Arc::new(OllamaEndpoint::new());
    let use_case = RunEnsembleUseCase::new(endpoint);

    let conversation = Conversation::from_prompt(question.clone())?;
    let input = RunEnsembleInput::new(conversation, agents);

    let response = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    let rendered = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&question, &response),
        OutputFormat::Answer => ConsoleFormatter::format_answer_only(&response),
        OutputFormat::Json => ConsoleFormatter::format_json(&response),
    };

    println!("{}", rendered);

    Ok(())
}
