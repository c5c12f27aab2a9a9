//! Complichat - compliance-analysis chat client
//!
//! Main entry point for the Complichat CLI.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use complichat::cli::{Cli, Commands};
use complichat::commands;
use complichat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat => {
            tracing::info!("Starting interactive chat");
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Query { text } => {
            tracing::info!("Submitting one-shot query");
            commands::query::run_query(config, &text).await?;
            Ok(())
        }
        Commands::Ingest { file } => {
            tracing::info!("Ingesting document: {}", file.display());
            commands::ingest::run_ingest(config, &file).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "complichat=debug"
    } else {
        "complichat=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
