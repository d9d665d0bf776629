//! Symbol search with graceful degradation.

use stockdash_core::traits::{QuoteProvider, SymbolMatch};
use tracing::{info, warn};

/// Search the provider for `query`.
///
/// A blank query returns nothing without touching the provider. Any other
/// query is passed through as given. Provider failures are logged and
/// reported as an empty result set.
pub async fn search_symbols<P: QuoteProvider + ?Sized>(provider: &P, query: &str) -> Vec<SymbolMatch> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    info!("Searching {} for '{}'", provider.name(), query);
    match provider.search(query).await {
        Ok(matches) => matches,
        Err(e) => {
            warn!("Symbol search failed: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedProvider;
    use async_trait::async_trait;
    use stockdash_core::error::QuoteError;
    use std::sync::Mutex;
    use stockdash_core::traits::IntradaySeries;

    struct FailingSearch;

    #[async_trait]
    impl QuoteProvider for FailingSearch {
        async fn search(&self, _query: &str) -> Result<Vec<SymbolMatch>, QuoteError> {
            Err(QuoteError::SearchFailure("503 Service Unavailable".into()))
        }

        async fn fetch_intraday_series(&self, _symbol: &str) -> Result<IntradaySeries, QuoteError> {
            Ok(IntradaySeries::unavailable())
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    #[derive(Default)]
    struct RecordingSearch {
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl QuoteProvider for RecordingSearch {
        async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, QuoteError> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(Vec::new())
        }

        async fn fetch_intraday_series(&self, _symbol: &str) -> Result<IntradaySeries, QuoteError> {
            Ok(IntradaySeries::unavailable())
        }

        fn name(&self) -> &str {
            "Recording"
        }
    }

    #[tokio::test]
    async fn test_query_is_forwarded_unmodified() {
        let provider = RecordingSearch::default();
        search_symbols(&provider, "  apple inc ").await;
        search_symbols(&provider, "   ").await;
        assert_eq!(*provider.queries.lock().unwrap(), vec!["  apple inc ".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_query_short_circuits() {
        let provider = ScriptedProvider::new();
        assert!(search_symbols(&provider, "").await.is_empty());
        assert!(search_symbols(&provider, "   ").await.is_empty());
        assert_eq!(provider.search_calls(), 0);
    }

    #[tokio::test]
    async fn test_failure_degrades_to_empty() {
        assert!(search_symbols(&FailingSearch, "fb").await.is_empty());
    }

    #[tokio::test]
    async fn test_query_reaches_provider() {
        let provider = ScriptedProvider::new();
        search_symbols(&provider, "fb").await;
        assert_eq!(provider.search_calls(), 1);
    }
}
