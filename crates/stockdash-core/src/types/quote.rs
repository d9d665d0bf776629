//! Live quotes and the keyed quote table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Latest known quote for a tracked symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol
    pub symbol: String,
    /// Last traded price
    pub last_price: f64,
    /// Change from the first to the last intraday sample, in percent
    pub percent_change: f64,
    /// Company display name
    pub company_name: String,
}

impl Quote {
    /// Placeholder entry shown before the first successful fetch.
    pub fn placeholder(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            last_price: 0.0,
            percent_change: 0.0,
            company_name: String::new(),
        }
    }

    /// Build a quote from the first and latest close of a sample window.
    ///
    /// Returns `None` if the first close is not a usable divisor.
    pub fn from_closes(
        symbol: impl Into<String>,
        company_name: impl Into<String>,
        first_close: f64,
        latest_close: f64,
    ) -> Option<Self> {
        if !first_close.is_finite() || first_close == 0.0 || !latest_close.is_finite() {
            return None;
        }
        Some(Self {
            symbol: symbol.into(),
            last_price: latest_close,
            percent_change: (latest_close - first_close) / first_close * 100.0,
            company_name: company_name.into(),
        })
    }

    pub fn is_up(&self) -> bool {
        self.percent_change > 0.0
    }

    pub fn is_down(&self) -> bool {
        self.percent_change < 0.0
    }
}

/// Quotes keyed by symbol, ordered for stable display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteTable {
    quotes: BTreeMap<String, Quote>,
}

impl QuoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with a placeholder entry per symbol.
    pub fn with_placeholders<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for symbol in symbols {
            let symbol = symbol.into();
            table.quotes.insert(symbol.clone(), Quote::placeholder(symbol));
        }
        table
    }

    /// Replace the entry for the quote's symbol in one assignment.
    pub fn upsert(&mut self, quote: Quote) {
        self.quotes.insert(quote.symbol.clone(), quote);
    }

    /// Add a placeholder for a symbol that has no entry yet.
    pub fn ensure(&mut self, symbol: &str) {
        if !self.quotes.contains_key(symbol) {
            self.quotes.insert(symbol.to_string(), Quote::placeholder(symbol));
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.values()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.quotes.keys().map(String::as_str)
    }
}

impl FromIterator<Quote> for QuoteTable {
    fn from_iter<T: IntoIterator<Item = Quote>>(iter: T) -> Self {
        let mut table = Self::new();
        for quote in iter {
            table.upsert(quote);
        }
        table
    }
}
