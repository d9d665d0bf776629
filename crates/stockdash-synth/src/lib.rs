//! Synthetic series generation for the dashboard.
//!
//! Produces timeframe-aware OHLC bars, market index lines and paired
//! actual/predicted price paths from a bounded random walk. Randomness is
//! always injected, so seeded RNGs reproduce a series exactly.

pub mod builders;
pub mod plan;
pub mod price;
pub mod walk;

pub use builders::{
    base_price_for, build_candles, build_indices, build_prediction, default_indices,
    format_change, percent_change, rebase_prediction, CandleSeries, IndexSeries, IndexSpec,
    PredictionSeries,
};
pub use plan::{resolve, SamplingPlan};
pub use price::round_price;
pub use walk::{walk, walk_bars, walk_points, Walk, WalkMode};
