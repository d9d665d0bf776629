//! Stock dashboard market data CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use stockdash_config::load_config;
use stockdash_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Setup logging; flags win over the config file
    let log_level = match cli.log_level {
        Some(cli::LogLevel::Trace) => "trace",
        Some(cli::LogLevel::Debug) => "debug",
        Some(cli::LogLevel::Info) => "info",
        Some(cli::LogLevel::Warn) => "warn",
        Some(cli::LogLevel::Error) => "error",
        None => config.logging.level.as_str(),
    };
    let _log_guard = setup_logging(
        log_level,
        cli.json_logs || config.logging.is_json(),
        config.logging.file.as_deref().map(Path::new),
    );

    // Execute command
    match cli.command {
        Commands::Candles(args) => cli::commands::candles::run(args, &config).await,
        Commands::Indices(args) => cli::commands::indices::run(args, &config).await,
        Commands::Predict(args) => cli::commands::predict::run(args, &config).await,
        Commands::Watch(args) => cli::commands::watch::run(args, &config).await,
        Commands::Search(args) => cli::commands::search::run(args, &config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&config, &cli.config).await,
    }
}
