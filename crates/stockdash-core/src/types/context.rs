//! Explicit request context passed to every builder.

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};

use super::Timeframe;

/// Symbol shown when nothing has been selected yet.
pub const DEFAULT_SYMBOL: &str = "AAPL";

/// What the caller is looking at, and when.
///
/// `now` carries the UTC offset used for 09:30 snapping and weekend checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardContext {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub now: DateTime<FixedOffset>,
}

impl DashboardContext {
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe, now: DateTime<FixedOffset>) -> Self {
        Self {
            symbol: normalize_symbol(&symbol.into()),
            timeframe,
            now,
        }
    }

    /// Context anchored at the local wall clock.
    pub fn at_local_now(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self::new(symbol, timeframe, Local::now().fixed_offset())
    }

    pub fn with_timeframe(&self, timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            ..self.clone()
        }
    }
}

fn normalize_symbol(symbol: &str) -> String {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        DEFAULT_SYMBOL.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-01-15T14:00:00-05:00").unwrap()
    }

    #[test]
    fn test_symbol_is_uppercased() {
        let ctx = DashboardContext::new(" msft ", Timeframe::Week, fixed_now());
        assert_eq!(ctx.symbol, "MSFT");
    }

    #[test]
    fn test_blank_symbol_falls_back() {
        let ctx = DashboardContext::new("", Timeframe::Intraday, fixed_now());
        assert_eq!(ctx.symbol, DEFAULT_SYMBOL);
    }

    #[test]
    fn test_with_timeframe_keeps_symbol() {
        let ctx = DashboardContext::new("nvda", Timeframe::Intraday, fixed_now());
        let yearly = ctx.with_timeframe(Timeframe::Year);
        assert_eq!(yearly.symbol, "NVDA");
        assert_eq!(yearly.timeframe, Timeframe::Year);
        assert_eq!(yearly.now, ctx.now);
    }
}
