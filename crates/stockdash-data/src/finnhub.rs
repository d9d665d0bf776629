//! Finnhub quote provider.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Client, Response};
use serde::Deserialize;
use stockdash_core::error::QuoteError;
use stockdash_core::traits::{IntradaySeries, PriceSample, QuoteProvider, SymbolMatch};
use tracing::{debug, warn};

/// Finnhub API configuration.
#[derive(Debug, Clone)]
pub struct FinnhubConfig {
    pub api_key: String,
    pub base_url: String,
    /// Candle resolution in minutes for the intraday sample
    pub resolution: String,
    /// How far back the intraday sample reaches
    pub lookback: Duration,
    pub timeout: std::time::Duration,
}

impl FinnhubConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://finnhub.io/api/v1";
    pub const DEFAULT_KEY_ENV: &'static str = "FINNHUB_API_KEY";

    /// Create config directly with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            resolution: "5".to_string(),
            lookback: Duration::days(1),
            timeout: std::time::Duration::from_secs(10),
        }
    }

    /// Load the API key from the named environment variable.
    pub fn from_env(key_env: &str) -> Result<Self, QuoteError> {
        let api_key = std::env::var(key_env)
            .map_err(|_| QuoteError::Configuration(format!("{} not set", key_env)))?;
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct FinnhubSearchResponse {
    #[serde(default)]
    result: Vec<FinnhubSearchHit>,
}

#[derive(Debug, Deserialize)]
struct FinnhubSearchHit {
    symbol: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "displaySymbol", default)]
    display_symbol: String,
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct FinnhubCandles {
    /// "ok" or "no_data"
    s: String,
    #[serde(default)]
    c: Vec<f64>,
    #[serde(default)]
    t: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct FinnhubProfile {
    #[serde(default)]
    name: String,
}

/// Finnhub REST client.
pub struct FinnhubProvider {
    config: FinnhubConfig,
    client: Client,
}

impl FinnhubProvider {
    /// Create a new Finnhub client.
    pub fn new(config: FinnhubConfig) -> Result<Self, QuoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QuoteError::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create from the default environment variable.
    pub fn from_env() -> Result<Self, QuoteError> {
        Self::new(FinnhubConfig::from_env(FinnhubConfig::DEFAULT_KEY_ENV)?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Response, QuoteError> {
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("token", self.config.api_key.clone()));

        let resp = self
            .client
            .get(self.url(path))
            .query(&query)
            .send()
            .await
            .map_err(|e| QuoteError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(QuoteError::Http(format!("{}: {}", status, text)));
        }
        Ok(resp)
    }

    async fn get_candles(&self, symbol: &str) -> Result<FinnhubCandles, QuoteError> {
        let to = Utc::now();
        let from = to - self.config.lookback;
        let params = [
            ("symbol", symbol.to_string()),
            ("resolution", self.config.resolution.clone()),
            ("from", from.timestamp().to_string()),
            ("to", to.timestamp().to_string()),
        ];

        self.get("/stock/candle", &params)
            .await
            .map_err(|e| QuoteError::fetch_failure(symbol, e))?
            .json()
            .await
            .map_err(|e| QuoteError::fetch_failure(symbol, e))
    }

    async fn get_company_name(&self, symbol: &str) -> Result<String, QuoteError> {
        let profile: FinnhubProfile = self
            .get("/stock/profile2", &[("symbol", symbol.to_string())])
            .await?
            .json()
            .await
            .map_err(|e| QuoteError::Parse(e.to_string()))?;
        Ok(profile.name)
    }
}

fn samples_from_candles(candles: &FinnhubCandles) -> Vec<PriceSample> {
    candles
        .t
        .iter()
        .zip(&candles.c)
        .map(|(t, c)| PriceSample {
            timestamp: t * 1000,
            close: *c,
        })
        .collect()
}

#[async_trait]
impl QuoteProvider for FinnhubProvider {
    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, QuoteError> {
        let data: FinnhubSearchResponse = self
            .get("/search", &[("q", query.to_string())])
            .await
            .map_err(|e| QuoteError::SearchFailure(e.to_string()))?
            .json()
            .await
            .map_err(|e| QuoteError::SearchFailure(e.to_string()))?;

        debug!("Search '{}' returned {} matches", query, data.result.len());
        Ok(data
            .result
            .into_iter()
            .map(|hit| SymbolMatch {
                symbol: hit.symbol,
                description: hit.description,
                display_symbol: hit.display_symbol,
                kind: hit.kind,
            })
            .collect())
    }

    async fn fetch_intraday_series(&self, symbol: &str) -> Result<IntradaySeries, QuoteError> {
        let (candles, name) = tokio::join!(self.get_candles(symbol), self.get_company_name(symbol));
        let candles = candles?;

        if candles.s != "ok" {
            debug!("No intraday data for {} (status {})", symbol, candles.s);
            return Ok(IntradaySeries::unavailable());
        }

        let company_name = name.unwrap_or_else(|e| {
            warn!("Profile lookup failed for {}: {}", symbol, e);
            String::new()
        });

        Ok(IntradaySeries {
            success: true,
            company_name,
            samples: samples_from_candles(&candles),
        })
    }

    fn name(&self) -> &str {
        "Finnhub"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candles_parse() {
        let json = r#"{"c":[241.5,242.0,242.86],"h":[1,2,3],"l":[1,2,3],"o":[1,2,3],"s":"ok","t":[1736951400,1736951700,1736952000],"v":[10,20,30]}"#;
        let candles: FinnhubCandles = serde_json::from_str(json).unwrap();
        let samples = samples_from_candles(&candles);

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].timestamp, 1_736_951_400_000);
        assert_eq!(samples[2].close, 242.86);
    }

    #[test]
    fn test_no_data_parses() {
        let candles: FinnhubCandles = serde_json::from_str(r#"{"s":"no_data"}"#).unwrap();
        assert_eq!(candles.s, "no_data");
        assert!(samples_from_candles(&candles).is_empty());
    }

    #[test]
    fn test_search_parse() {
        let json = r#"{"count":1,"result":[{"description":"APPLE INC","displaySymbol":"AAPL","symbol":"AAPL","type":"Common Stock"}]}"#;
        let resp: FinnhubSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.result.len(), 1);
        assert_eq!(resp.result[0].display_symbol, "AAPL");
        assert_eq!(resp.result[0].kind, "Common Stock");
    }

    #[test]
    fn test_config_trims_base_url() {
        let config = FinnhubConfig::new("key").with_base_url("http://localhost:9000/api/");
        assert_eq!(config.base_url, "http://localhost:9000/api");
    }

    #[test]
    fn test_missing_env_key() {
        let err = FinnhubConfig::from_env("STOCKDASH_TEST_KEY_THAT_IS_NOT_SET").unwrap_err();
        assert!(matches!(err, QuoteError::Configuration(_)));
    }
}
