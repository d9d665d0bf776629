//! Core data types for the market data engine.

mod context;
mod ohlcv;
mod quote;
mod recommendation;
mod timeframe;

pub use context::{DashboardContext, DEFAULT_SYMBOL};
pub use ohlcv::{Bar, IndexPoint};
pub use quote::{Quote, QuoteTable};
pub use recommendation::Recommendation;
pub use timeframe::Timeframe;
