//! Connector playground command-line interface.
//!
//! Opens a session for an owner and connector, then lists models, field
//! metadata or records, or edits a single record field.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use playground_client::PlaygroundConfig;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!(config_file = ?path, "Loading configuration");
            PlaygroundConfig::from_file(path)?
        }
        None => PlaygroundConfig::from_env()?,
    };
    debug!(api_base_url = %config.api_base_url(), "Configuration loaded");

    match cli.command {
        Commands::Models { target } => cli::handle_models(&config, &target).await,
        Commands::Fields {
            target,
            model,
            refresh,
        } => cli::handle_fields(&config, &target, model.as_deref(), refresh).await,
        Commands::List {
            target,
            model,
            limit,
            pins,
        } => cli::handle_list(&config, &target, model.as_deref(), limit, &pins).await,
        Commands::Edit {
            target,
            model,
            limit,
            record,
            field,
            value,
        } => {
            cli::handle_edit(
                &config,
                &target,
                model.as_deref(),
                limit,
                &record,
                &field,
                &value,
            )
            .await
        }
    }
}
