//! Configuration management.

mod settings;

pub use settings::{
    AggregatorSettings, AppConfig, AppSettings, LoggingConfig, ProviderSettings, StorageSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Prefix for environment overrides, e.g. `STOCKDASH__AGGREGATOR__POLL_INTERVAL_SECS`.
pub const ENV_PREFIX: &str = "STOCKDASH";

/// Errors raised while loading or checking configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Load configuration from file and environment.
///
/// The file is optional; anything it leaves out falls back to defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("aggregator.tracked_symbols")
                .with_list_parse_key("aggregator.banner_symbols"),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}

/// Render a configuration back to TOML.
pub fn to_toml(config: &AppConfig) -> Result<String, SettingsError> {
    Ok(toml::to_string_pretty(config)?)
}
