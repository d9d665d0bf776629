//! Live quote aggregation.
//!
//! Polls a quote provider for a fixed symbol set on an interval and merges
//! the results into a keyed quote table.

mod aggregator;

pub use aggregator::{AggregatorConfig, AggregatorHandle, QuoteAggregator, DEFAULT_POLL_INTERVAL};
