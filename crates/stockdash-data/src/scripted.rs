//! In-memory quote provider with canned responses.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use stockdash_core::error::QuoteError;
use stockdash_core::traits::{IntradaySeries, PriceSample, QuoteProvider, SymbolMatch};

/// One canned answer to an intraday fetch.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    Series(IntradaySeries),
    Unavailable,
    Fail(String),
}

impl ScriptedResponse {
    /// Successful response built from close prices spaced five minutes apart.
    pub fn closes(company_name: &str, closes: &[f64]) -> Self {
        let samples = closes
            .iter()
            .enumerate()
            .map(|(i, close)| PriceSample {
                timestamp: i as i64 * 300_000,
                close: *close,
            })
            .collect();
        ScriptedResponse::Series(IntradaySeries {
            success: true,
            company_name: company_name.to_string(),
            samples,
        })
    }
}

#[derive(Default)]
struct Script {
    /// Answers consumed in order; the last one repeats
    responses: VecDeque<ScriptedResponse>,
    delay: Option<Duration>,
}

/// Provider that replays scripted responses per symbol.
///
/// Symbols without a script are reported as unavailable.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: Mutex<HashMap<String, Script>>,
    directory: Vec<SymbolMatch>,
    fetch_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for a symbol.
    pub fn with_response(self, symbol: &str, response: ScriptedResponse) -> Self {
        self.push_response(symbol, response);
        self
    }

    /// Delay every fetch of a symbol.
    pub fn with_delay(self, symbol: &str, delay: Duration) -> Self {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.entry(symbol.to_string()).or_default().delay = Some(delay);
        }
        self
    }

    /// Entries served by `search`.
    pub fn with_directory(mut self, directory: Vec<SymbolMatch>) -> Self {
        self.directory = directory;
        self
    }

    /// Queue a response after construction.
    pub fn push_response(&self, symbol: &str, response: ScriptedResponse) {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts
                .entry(symbol.to_string())
                .or_default()
                .responses
                .push_back(response);
        }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    fn next_response(&self, symbol: &str) -> (ScriptedResponse, Option<Duration>) {
        let mut scripts = match self.scripts.lock() {
            Ok(scripts) => scripts,
            Err(poisoned) => poisoned.into_inner(),
        };
        match scripts.get_mut(symbol) {
            Some(script) => {
                let response = if script.responses.len() > 1 {
                    script.responses.pop_front()
                } else {
                    script.responses.front().cloned()
                };
                (response.unwrap_or(ScriptedResponse::Unavailable), script.delay)
            }
            None => (ScriptedResponse::Unavailable, None),
        }
    }
}

#[async_trait]
impl QuoteProvider for ScriptedProvider {
    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, QuoteError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let needle = query.to_uppercase();
        Ok(self
            .directory
            .iter()
            .filter(|m| m.symbol.contains(&needle) || m.description.to_uppercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn fetch_intraday_series(&self, symbol: &str) -> Result<IntradaySeries, QuoteError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let (response, delay) = self.next_response(symbol);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match response {
            ScriptedResponse::Series(series) => Ok(series),
            ScriptedResponse::Unavailable => Ok(IntradaySeries::unavailable()),
            ScriptedResponse::Fail(reason) => Err(QuoteError::fetch_failure(symbol, reason)),
        }
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}
