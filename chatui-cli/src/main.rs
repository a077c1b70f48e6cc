//! CLI entry point for chatui

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use chatui_core::config::{Config, ConfigLoader, DEFAULT_SYSTEM_PROMPT};
use chatui_core::logging::init_logging;
use chatui_core::transcript::TranscriptStore;
use chatui_providers::OllamaClient;

mod command;
mod progress;
mod session;
mod ui;

use session::SessionController;
use ui::Ui;

#[derive(Parser)]
#[command(name = "chatui")]
#[command(about = "An interactive terminal chat session backed by a local LLM")]
struct Cli {
    /// Load a saved transcript into the session history
    #[arg(short, long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Configuration directory
    #[arg(short, long, value_name = "DIR")]
    config_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Usage problems and the help text both leave a non-zero status
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(2);
        }
    };

    if let Err(err) = run(cli).await {
        eprintln!("chatui: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let loader = match cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;
    let _guard = init_logging(&config.logging.level, &loader.log_dir(&config));

    info!(
        "Starting session with model {} at {}",
        config.provider.model, config.provider.api_base
    );

    let ui = Ui::new();
    let store = TranscriptStore::new();
    let system_prompt = resolve_system_prompt(&config, &store, &ui);

    let provider = Arc::new(OllamaClient::new(
        config.provider.api_base.clone(),
        config.provider.model.clone(),
    ));

    let mut controller = SessionController::new(system_prompt, provider, store, &ui);

    if let Some(file) = cli.load {
        controller.load_transcript(&file);
    }

    controller.run().await;
    Ok(())
}

/// Resolve the system prompt from the configured context file, falling
/// back to the compiled-in default.
fn resolve_system_prompt(config: &Config, store: &TranscriptStore, ui: &Ui) -> String {
    let Some(path) = &config.context_file else {
        return DEFAULT_SYSTEM_PROMPT.to_string();
    };

    match store.load_context(path) {
        Ok(prompt) => prompt,
        Err(err) => {
            warn!("Failed to load context from {}: {}", path.display(), err);
            ui.report_error(&format!("Error loading context: {}", err));
            DEFAULT_SYSTEM_PROMPT.to_string()
        }
    }
}
