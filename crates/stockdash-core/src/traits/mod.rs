//! Core traits for the market data engine.

mod quote_provider;

pub use quote_provider::{IntradaySeries, PriceSample, QuoteProvider, SymbolMatch};
