//! Quote provider trait definitions.

use crate::error::QuoteError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One intraday close sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Close price for the sample bucket
    pub close: f64,
}

/// Response of an intraday series fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntradaySeries {
    /// Whether the provider had data for the symbol
    pub success: bool,
    /// Company display name (may be empty)
    pub company_name: String,
    /// Samples ordered from oldest to newest
    pub samples: Vec<PriceSample>,
}

impl IntradaySeries {
    /// A response carrying no usable data.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Whether this response can update a quote.
    pub fn is_usable(&self) -> bool {
        self.success && !self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&PriceSample> {
        self.samples.first()
    }

    pub fn latest(&self) -> Option<&PriceSample> {
        self.samples.last()
    }
}

/// A symbol search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub description: String,
    #[serde(default)]
    pub display_symbol: String,
    #[serde(default)]
    pub kind: String,
}

/// Trait for external quote providers.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Search symbols matching a free-text query.
    ///
    /// Callers short-circuit empty queries before reaching the provider.
    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, QuoteError>;

    /// Fetch today's intraday close samples for a symbol.
    ///
    /// # Returns
    /// An `IntradaySeries`; `success = false` or empty samples mean the
    /// symbol is unavailable for this cycle.
    async fn fetch_intraday_series(&self, symbol: &str) -> Result<IntradaySeries, QuoteError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}
