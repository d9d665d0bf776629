//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use stockdash_config::{to_toml, AppConfig};

pub async fn run(config: &AppConfig, config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("File not found, using defaults and environment overrides");
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Provider: {}", config.provider.base_url);
    println!("API key variable: {}", config.provider.api_key_env);
    println!("Poll interval: {}s", config.aggregator.poll_interval_secs);
    println!("Tracked symbols: {}", config.aggregator.tracked_symbols.join(", "));
    println!("State file: {}", config.storage.state_file);
    println!();
    println!("Effective configuration:");
    println!("{}", to_toml(config)?);

    Ok(())
}
