//! Core types and traits for the stockdash market data engine.
//!
//! This crate provides the foundational building blocks including:
//! - Series types (Bar, IndexPoint) and the Timeframe selector
//! - Quotes and the keyed quote table
//! - The Buy/Hold/Sell recommendation classifier
//! - The quote provider trait implemented by data sources

pub mod types;
pub mod traits;
pub mod error;

pub use error::{DashboardError, DashboardResult, GenerationError, QuoteError, StorageError};
pub use types::*;
pub use traits::*;
