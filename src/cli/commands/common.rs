//! Helpers shared by the commands.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use stockdash_config::AppConfig;
use stockdash_core::QuoteProvider;
use stockdash_data::{FinnhubConfig, FinnhubProvider, SymbolStore};
use tracing::{debug, warn};

/// Seeded RNG when a seed is given, otherwise one seeded from the OS.
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            debug!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// Reference time from `--at`, or the local clock.
pub fn reference_time(at: Option<&str>) -> Result<DateTime<FixedOffset>> {
    match at {
        Some(at) => DateTime::parse_from_rfc3339(at)
            .with_context(|| format!("Invalid --at '{}', expected RFC 3339 like 2025-01-15T14:00:00-05:00", at)),
        None => Ok(Local::now().fixed_offset()),
    }
}

/// Symbol from the command line, remembered for next time, or the last one viewed.
pub fn select_symbol(store: &SymbolStore, requested: Option<&str>) -> String {
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        Some(symbol) => {
            let symbol = symbol.to_uppercase();
            if let Err(e) = store.save_symbol(&symbol) {
                warn!("Could not remember {}: {}", symbol, e);
            }
            symbol
        }
        None => store.load_symbol(),
    }
}

/// Live quote provider built from configuration.
pub fn live_provider(config: &AppConfig) -> Result<Arc<dyn QuoteProvider>> {
    let settings = &config.provider;
    let finnhub = FinnhubConfig::from_env(&settings.api_key_env)
        .with_context(|| format!("Set {} or pass --offline", settings.api_key_env))?
        .with_base_url(settings.base_url.as_str())
        .with_timeout(settings.timeout());

    Ok(Arc::new(FinnhubProvider::new(finnhub)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_seeded_rng_repeats() {
        let a: f64 = rng(Some(7)).gen();
        let b: f64 = rng(Some(7)).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reference_time_parses_offset() {
        let now = reference_time(Some("2025-01-15T14:00:00-05:00")).unwrap();
        assert_eq!(now.offset().utc_minus_local(), 5 * 3600);
        assert!(reference_time(Some("yesterday")).is_err());
    }

    #[test]
    fn test_select_symbol_persists_choice() {
        let dir = tempfile::tempdir().unwrap();
        let store = SymbolStore::new(dir.path().join("state.json"));

        assert_eq!(select_symbol(&store, None), "AAPL");
        assert_eq!(select_symbol(&store, Some(" msft ")), "MSFT");
        assert_eq!(select_symbol(&store, None), "MSFT");
        assert_eq!(select_symbol(&store, Some("")), "MSFT");
    }
}
