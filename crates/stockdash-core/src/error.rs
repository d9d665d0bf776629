//! Error types for the market data engine.

use thiserror::Error;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while generating synthetic series.
///
/// These only arise from invalid input and are propagated to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("Invalid base price: {0} (must be finite and positive)")]
    InvalidBasePrice(f64),

    #[error("Invalid price pair: current {current}, predicted {predicted}")]
    InvalidPrice { current: f64, predicted: f64 },

    #[error("Sampling plan out of range: {0}")]
    PlanOutOfRange(String),
}

/// Quote provider errors.
///
/// Expected at runtime; the aggregator logs them and keeps the last known value.
#[derive(Error, Debug, Clone)]
pub enum QuoteError {
    #[error("Quote fetch failed for {symbol}: {reason}")]
    QuoteFetchFailure { symbol: String, reason: String },

    #[error("Symbol search failed: {0}")]
    SearchFailure(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl QuoteError {
    /// Build a fetch failure for a symbol.
    pub fn fetch_failure(symbol: impl Into<String>, reason: impl ToString) -> Self {
        QuoteError::QuoteFetchFailure {
            symbol: symbol.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors from the persisted symbol store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for engine operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_converts() {
        let err: DashboardError = GenerationError::InvalidTimeframe("5Y".into()).into();
        assert_eq!(err.to_string(), "Generation error: Invalid timeframe: 5Y");
    }

    #[test]
    fn test_fetch_failure_message() {
        let err = QuoteError::fetch_failure("AAPL", "timeout");
        assert_eq!(err.to_string(), "Quote fetch failed for AAPL: timeout");
    }
}
