//! Candlestick series for a single symbol.

use rand::Rng;
use serde::{Deserialize, Serialize};
use stockdash_core::{Bar, DashboardContext, GenerationError, Timeframe};
use tracing::debug;

use crate::plan::SamplingPlan;
use crate::walk::walk_bars;

/// Base price used for symbols without a known reference price.
pub const FALLBACK_BASE_PRICE: f64 = 100.0;

const REFERENCE_PRICES: &[(&str, f64)] = &[
    ("AAPL", 246.81),
    ("GOOGL", 175.36),
    ("MSFT", 445.90),
    ("AMZN", 226.09),
    ("META", 613.81),
    ("NOW", 1115.00),
];

/// Reference price a symbol's walk starts from.
pub fn base_price_for(symbol: &str) -> f64 {
    REFERENCE_PRICES
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
        .map(|(_, price)| *price)
        .unwrap_or(FALLBACK_BASE_PRICE)
}

/// Candlestick bars for one symbol and timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub bars: Vec<Bar>,
}

impl CandleSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }

    /// Build a series starting from the symbol's reference price.
    pub fn for_symbol<R: Rng + ?Sized>(
        ctx: &DashboardContext,
        rng: &mut R,
    ) -> Result<Self, GenerationError> {
        build_candles(ctx, base_price_for(&ctx.symbol), rng)
    }
}

/// Build candlestick bars for `ctx.symbol` over `ctx.timeframe`.
pub fn build_candles<R: Rng + ?Sized>(
    ctx: &DashboardContext,
    base_price: f64,
    rng: &mut R,
) -> Result<CandleSeries, GenerationError> {
    let plan = SamplingPlan::resolve(ctx.timeframe, ctx.now)?;
    let bars = walk_bars(base_price, &plan, rng)?;
    debug!(
        "Generated {} {} bars for {} from {:.2}",
        bars.len(),
        ctx.timeframe,
        ctx.symbol,
        base_price
    );

    Ok(CandleSeries {
        symbol: ctx.symbol.clone(),
        timeframe: ctx.timeframe,
        bars,
    })
}
