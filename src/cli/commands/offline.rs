//! Generated quotes for running without an API key.

use async_trait::async_trait;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use stockdash_core::{
    DashboardContext, IntradaySeries, PriceSample, QuoteError, QuoteProvider, SymbolMatch, Timeframe,
};
use stockdash_data::ScriptedProvider;
use stockdash_synth::{base_price_for, walk_points, SamplingPlan};
use tracing::{debug, warn};

const DIRECTORY: &[(&str, &str)] = &[
    ("AAPL", "APPLE INC"),
    ("GOOGL", "ALPHABET INC-CL A"),
    ("MSFT", "MICROSOFT CORP"),
    ("AMZN", "AMAZON.COM INC"),
    ("META", "META PLATFORMS INC-CLASS A"),
    ("NOW", "SERVICENOW INC"),
    ("TSLA", "TESLA INC"),
    ("NVDA", "NVIDIA CORP"),
    ("JPM", "JPMORGAN CHASE & CO"),
];

fn company_name(symbol: &str) -> &'static str {
    DIRECTORY
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, name)| *name)
        .unwrap_or("")
}

/// Symbols the offline search knows about.
fn directory() -> Vec<SymbolMatch> {
    DIRECTORY
        .iter()
        .map(|(symbol, name)| SymbolMatch {
            symbol: symbol.to_string(),
            description: name.to_string(),
            display_symbol: symbol.to_string(),
            kind: "Common Stock".to_string(),
        })
        .collect()
}

struct WalkState {
    rng: StdRng,
    last_close: HashMap<String, f64>,
}

/// Provider answering every poll with a fresh intraday walk.
///
/// Each walk starts where the symbol's previous one ended.
pub struct OfflineProvider {
    plan: Option<SamplingPlan>,
    state: Mutex<WalkState>,
    directory: ScriptedProvider,
}

impl OfflineProvider {
    pub fn new(ctx: &DashboardContext, rng: StdRng) -> Self {
        let plan = match SamplingPlan::resolve(Timeframe::Intraday, ctx.now) {
            Ok(plan) => Some(plan),
            Err(e) => {
                warn!("Offline quotes unavailable: {}", e);
                None
            }
        };
        Self {
            plan,
            state: Mutex::new(WalkState {
                rng,
                last_close: HashMap::new(),
            }),
            directory: ScriptedProvider::new().with_directory(directory()),
        }
    }

    fn state(&self) -> MutexGuard<'_, WalkState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl QuoteProvider for OfflineProvider {
    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, QuoteError> {
        self.directory.search(query).await
    }

    async fn fetch_intraday_series(&self, symbol: &str) -> Result<IntradaySeries, QuoteError> {
        let Some(plan) = &self.plan else {
            return Ok(IntradaySeries::unavailable());
        };

        let mut state = self.state();
        let base = state
            .last_close
            .get(symbol)
            .copied()
            .unwrap_or_else(|| base_price_for(symbol));
        let points = walk_points(base, plan, &mut state.rng)
            .map_err(|e| QuoteError::fetch_failure(symbol, e))?;
        if let Some(last) = points.last() {
            state.last_close.insert(symbol.to_string(), last.value);
        }
        debug!("Offline walk for {} from {:.2}", symbol, base);

        Ok(IntradaySeries {
            success: true,
            company_name: company_name(symbol).to_string(),
            samples: points
                .iter()
                .map(|p| PriceSample {
                    timestamp: p.timestamp,
                    close: p.value,
                })
                .collect(),
        })
    }

    fn name(&self) -> &str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rand::SeedableRng;

    fn provider(seed: u64) -> OfflineProvider {
        let now = DateTime::parse_from_rfc3339("2025-01-15T14:00:00-05:00").unwrap();
        let ctx = DashboardContext::new("AAPL", Timeframe::Intraday, now);
        OfflineProvider::new(&ctx, StdRng::seed_from_u64(seed))
    }

    #[tokio::test]
    async fn test_offline_quotes_drift_between_polls() {
        let provider = provider(3);

        let first = provider.fetch_intraday_series("AAPL").await.unwrap();
        assert!(first.is_usable());
        assert_eq!(first.samples.len(), 78);
        assert_eq!(first.company_name, "APPLE INC");
        assert!((first.samples[0].close - 246.81).abs() < 0.5);

        let second = provider.fetch_intraday_series("AAPL").await.unwrap();
        let carried = first.latest().unwrap().close;
        assert!((second.samples[0].close - carried).abs() < 0.5);
    }

    #[tokio::test]
    async fn test_offline_quotes_keep_moving_on_long_runs() {
        let provider = provider(9);

        let mut previous = provider.fetch_intraday_series("NVDA").await.unwrap();
        for _ in 0..64 {
            let next = provider.fetch_intraday_series("NVDA").await.unwrap();
            assert!(next.is_usable());
            assert_ne!(next.samples, previous.samples);
            previous = next;
        }
    }

    #[tokio::test]
    async fn test_unknown_symbol_has_blank_name() {
        let series = provider(1).fetch_intraday_series("ZZZZ").await.unwrap();
        assert!(series.is_usable());
        assert_eq!(series.company_name, "");
    }

    #[tokio::test]
    async fn test_offline_directory_search() {
        let hits = provider(1).search("micro").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].symbol, "MSFT");
    }
}
