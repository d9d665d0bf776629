//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::SettingsError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub aggregator: AggregatorSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

impl AppConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.aggregator.poll_interval_secs == 0 {
            return Err(SettingsError::Invalid(
                "aggregator.poll_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.aggregator.tracked_symbols.iter().all(|s| s.trim().is_empty()) {
            return Err(SettingsError::Invalid(
                "aggregator.tracked_symbols must name at least one symbol".to_string(),
            ));
        }
        if self.provider.timeout_secs == 0 {
            return Err(SettingsError::Invalid("provider.timeout_secs must be at least 1".to_string()));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(SettingsError::Invalid(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "stockdash".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

/// Quote provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://finnhub.io/api/v1".to_string(),
            api_key_env: "FINNHUB_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Live quote polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorSettings {
    pub poll_interval_secs: u64,
    /// Symbols shown on the watchlist cards
    pub tracked_symbols: Vec<String>,
    /// Symbols shown in the scrolling banner
    pub banner_symbols: Vec<String>,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        let tracked: Vec<String> = ["AAPL", "GOOGL", "MSFT", "AMZN", "META"]
            .into_iter()
            .map(String::from)
            .collect();
        let mut banner = tracked.clone();
        banner.extend(["TSLA", "NVDA", "JPM"].into_iter().map(String::from));

        Self {
            poll_interval_secs: 60,
            tracked_symbols: tracked,
            banner_symbols: banner,
        }
    }
}

impl AggregatorSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Client state persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub state_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            state_file: ".stockdash/state.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_extends_tracked() {
        let settings = AggregatorSettings::default();
        assert_eq!(settings.tracked_symbols, vec!["AAPL", "GOOGL", "MSFT", "AMZN", "META"]);
        assert_eq!(&settings.banner_symbols[5..], ["TSLA", "NVDA", "JPM"]);
        assert_eq!(settings.poll_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
        assert!(AppConfig::default().validate().is_ok());
    }
}
