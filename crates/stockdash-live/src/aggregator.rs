//! Quote polling loop with a cancellable handle.

use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::thread::{self, ThreadId};
use std::time::Duration;
use stockdash_core::error::QuoteError;
use stockdash_core::traits::{IntradaySeries, QuoteProvider};
use stockdash_core::types::{Quote, QuoteTable};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// How often the quote table is refreshed.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Aggregator settings.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub poll_interval: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

type UpdateFn = Box<dyn Fn(&QuoteTable) + Send + Sync>;

/// Builder for a polling loop over a fixed symbol set.
pub struct QuoteAggregator {
    provider: Arc<dyn QuoteProvider>,
    symbols: Vec<String>,
    config: AggregatorConfig,
    table: QuoteTable,
}

impl QuoteAggregator {
    /// Track `symbols` using `provider`. Duplicates are dropped.
    pub fn new<I, S>(provider: Arc<dyn QuoteProvider>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tracked: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.into().trim().to_uppercase();
            if !symbol.is_empty() && !tracked.contains(&symbol) {
                tracked.push(symbol);
            }
        }
        let table = QuoteTable::with_placeholders(tracked.iter().cloned());

        Self {
            provider,
            symbols: tracked,
            config: AggregatorConfig::default(),
            table,
        }
    }

    pub fn with_config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the table with last known quotes, e.g. from a previous run.
    ///
    /// Tracked symbols missing from `table` still get a placeholder.
    pub fn with_initial_table(mut self, table: QuoteTable) -> Self {
        let mut seeded = table;
        for symbol in &self.symbols {
            seeded.ensure(symbol);
        }
        self.table = seeded;
        self
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Start polling on the current tokio runtime.
    ///
    /// The first batch is fetched immediately, then one batch per poll
    /// interval. `on_update` receives the whole table after each batch and
    /// may stop or drop its own handle.
    pub fn start<F>(self, on_update: F) -> AggregatorHandle
    where
        F: Fn(&QuoteTable) + Send + Sync + 'static,
    {
        let table = Arc::new(RwLock::new(self.table));
        let gate = Arc::new(PublishGate::default());
        let (stop_tx, stop_rx) = watch::channel(false);

        info!(
            "Starting quote aggregator for {} symbols via {} every {:?}",
            self.symbols.len(),
            self.provider.name(),
            self.config.poll_interval
        );

        let poller = Poller {
            provider: self.provider,
            symbols: self.symbols,
            poll_interval: self.config.poll_interval.max(Duration::from_millis(1)),
            table: Arc::clone(&table),
            gate: Arc::clone(&gate),
            on_update: Box::new(on_update),
        };
        let task = tokio::spawn(poller.run(stop_rx));

        AggregatorHandle {
            table,
            gate,
            stop_tx,
            task: Some(task),
        }
    }
}

/// Owns the polling task. Dropping the handle stops it.
pub struct AggregatorHandle {
    table: Arc<RwLock<QuoteTable>>,
    gate: Arc<PublishGate>,
    stop_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl AggregatorHandle {
    /// Stop polling. Idempotent.
    ///
    /// Once this returns no further update is published, including one from
    /// a batch that is still in flight. Called from another thread while
    /// `on_update` runs, it waits for that call to finish; called from inside
    /// `on_update`, it returns at once.
    pub fn stop(&self) {
        if self.gate.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        let _ = self.stop_tx.send(true);
        if !self.gate.is_publishing_on_current_thread() {
            drop(lock(&self.gate.publish));
        }
        info!("Quote aggregator stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.gate.is_stopped()
    }

    /// Snapshot of the current quote table.
    pub fn table(&self) -> QuoteTable {
        match self.table.read() {
            Ok(table) => table.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Stop and wait for the polling task to exit.
    pub async fn join(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Quote aggregator task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for AggregatorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Orders `stop` against result merges and `on_update`.
#[derive(Default)]
struct PublishGate {
    stopped: AtomicBool,
    /// Held while merging results and publishing
    publish: Mutex<()>,
    /// Thread currently inside `on_update`
    publisher: Mutex<Option<ThreadId>>,
}

impl PublishGate {
    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn is_publishing_on_current_thread(&self) -> bool {
        *lock(&self.publisher) == Some(thread::current().id())
    }

    fn set_publisher(&self, publisher: Option<ThreadId>) {
        *lock(&self.publisher) = publisher;
    }
}

struct Poller {
    provider: Arc<dyn QuoteProvider>,
    symbols: Vec<String>,
    poll_interval: Duration,
    table: Arc<RwLock<QuoteTable>>,
    gate: Arc<PublishGate>,
    on_update: UpdateFn,
}

impl Poller {
    async fn run(self, mut stop_rx: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = stop_rx.changed() => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                biased;
                _ = stop_rx.changed() => break,
                _ = self.poll_cycle() => {}
            }
        }
        debug!("Quote aggregator task exiting");
    }

    /// Fetch every symbol concurrently and merge results as they land.
    async fn poll_cycle(&self) {
        let mut pending: FuturesUnordered<_> = self
            .symbols
            .iter()
            .map(|symbol| async move {
                let result = self.provider.fetch_intraday_series(symbol).await;
                (symbol, result)
            })
            .collect();

        let mut updated = 0usize;
        while let Some((symbol, result)) = pending.next().await {
            let _publish = lock(&self.gate.publish);
            if self.gate.is_stopped() {
                return;
            }
            match self.merge(symbol, result) {
                Ok(()) => updated += 1,
                Err(e) => warn!("Keeping last quote for {}: {}", symbol, e),
            }
        }

        let _publish = lock(&self.gate.publish);
        if self.gate.is_stopped() {
            return;
        }
        let snapshot = match self.table.read() {
            Ok(table) => table.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        debug!("Quote cycle updated {}/{} symbols", updated, self.symbols.len());

        self.gate.set_publisher(Some(thread::current().id()));
        (self.on_update)(&snapshot);
        self.gate.set_publisher(None);
    }

    fn merge(&self, symbol: &str, result: Result<IntradaySeries, QuoteError>) -> Result<(), QuoteError> {
        let series = result?;
        let (first, latest) = match (series.first(), series.latest()) {
            (Some(first), Some(latest)) if series.is_usable() => (first.close, latest.close),
            _ => return Err(QuoteError::fetch_failure(symbol, "no intraday data")),
        };

        let mut table = match self.table.write() {
            Ok(table) => table,
            Err(poisoned) => poisoned.into_inner(),
        };
        let company_name = if series.company_name.is_empty() {
            table.get(symbol).map(|q| q.company_name.clone()).unwrap_or_default()
        } else {
            series.company_name
        };
        let quote = Quote::from_closes(symbol, company_name, first, latest)
            .ok_or_else(|| QuoteError::fetch_failure(symbol, "unusable first close"))?;
        table.upsert(quote);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdash_data::{ScriptedProvider, ScriptedResponse};
    use tokio::sync::mpsc;

    fn quote(symbol: &str, price: f64, change: f64, name: &str) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            last_price: price,
            percent_change: change,
            company_name: name.to_string(),
        }
    }

    fn start_collecting(aggregator: QuoteAggregator) -> (AggregatorHandle, mpsc::UnboundedReceiver<QuoteTable>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = aggregator.start(move |table| {
            let _ = tx.send(table.clone());
        });
        (handle, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_symbol_keeps_prior_quote() {
        let provider = ScriptedProvider::new()
            .with_response("AAPL", ScriptedResponse::closes("Apple Inc", &[240.0, 243.0, 242.4]))
            .with_response("MSFT", ScriptedResponse::closes("Microsoft Corp", &[440.0, 435.6]))
            .with_response("GOOGL", ScriptedResponse::Fail("503 Service Unavailable".into()));

        let prior: QuoteTable = [
            quote("AAPL", 239.0, 0.1, "Apple Inc"),
            quote("MSFT", 441.0, -0.2, "Microsoft Corp"),
            quote("GOOGL", 175.36, 0.8, "Alphabet Inc"),
        ]
        .into_iter()
        .collect();

        let aggregator = QuoteAggregator::new(Arc::new(provider), ["AAPL", "MSFT", "GOOGL"])
            .with_initial_table(prior.clone());
        let (handle, mut rx) = start_collecting(aggregator);

        let table = rx.recv().await.unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("GOOGL"), prior.get("GOOGL"));

        let aapl = table.get("AAPL").unwrap();
        assert_eq!(aapl.last_price, 242.4);
        assert!((aapl.percent_change - 1.0).abs() < 1e-9);

        let msft = table.get("MSFT").unwrap();
        assert_eq!(msft.last_price, 435.6);
        assert!((msft.percent_change + 1.0).abs() < 1e-9);

        assert_eq!(handle.table(), table);
        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_symbol_keeps_placeholder() {
        let provider = ScriptedProvider::new()
            .with_response("AAPL", ScriptedResponse::closes("Apple Inc", &[240.0, 242.4]))
            .with_response("META", ScriptedResponse::Unavailable)
            .with_response("AMZN", ScriptedResponse::closes("Amazon", &[]));

        let aggregator = QuoteAggregator::new(Arc::new(provider), ["AAPL", "META", "AMZN"]);
        let (handle, mut rx) = start_collecting(aggregator);

        let table = rx.recv().await.unwrap();
        assert_eq!(table.get("META").unwrap(), &Quote::placeholder("META"));
        assert_eq!(table.get("AMZN").unwrap(), &Quote::placeholder("AMZN"));
        assert_eq!(table.get("AAPL").unwrap().last_price, 242.4);
        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_mid_batch_publishes_nothing() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_response("AAPL", ScriptedResponse::closes("Apple Inc", &[240.0, 242.4]))
                .with_response("MSFT", ScriptedResponse::closes("Microsoft Corp", &[440.0, 445.9]))
                .with_response("GOOGL", ScriptedResponse::closes("Alphabet Inc", &[175.0, 175.36]))
                .with_delay("GOOGL", Duration::from_secs(5)),
        );

        let aggregator = QuoteAggregator::new(provider.clone(), ["AAPL", "MSFT", "GOOGL"]);
        let (handle, mut rx) = start_collecting(aggregator);

        // Let the batch start; GOOGL is still outstanding.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(provider.fetch_calls(), 3);

        handle.stop();
        handle.stop();
        assert!(handle.is_stopped());

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(provider.fetch_calls(), 3);
        assert_eq!(handle.table().get("GOOGL").unwrap(), &Quote::placeholder("GOOGL"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repolls_every_interval() {
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_response("AAPL", ScriptedResponse::closes("Apple Inc", &[240.0, 242.4]))
                .with_response("AAPL", ScriptedResponse::closes("Apple Inc", &[240.0, 246.0])),
        );

        let aggregator = QuoteAggregator::new(provider.clone(), ["AAPL"]);
        let (handle, mut rx) = start_collecting(aggregator);

        let start = tokio::time::Instant::now();
        let first = rx.recv().await.unwrap();
        assert_eq!(first.get("AAPL").unwrap().last_price, 242.4);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.get("AAPL").unwrap().last_price, 246.0);
        assert!((second.get("AAPL").unwrap().percent_change - 2.5).abs() < 1e-9);
        assert!(start.elapsed() >= DEFAULT_POLL_INTERVAL);
        assert_eq!(provider.fetch_calls(), 2);

        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_from_inside_update() {
        let provider = Arc::new(
            ScriptedProvider::new().with_response("AAPL", ScriptedResponse::closes("Apple Inc", &[240.0, 242.4])),
        );
        let slot: Arc<Mutex<Option<AggregatorHandle>>> = Arc::new(Mutex::new(None));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let callback_slot = Arc::clone(&slot);
        let handle = QuoteAggregator::new(provider.clone(), ["AAPL"])
            .with_config(AggregatorConfig {
                poll_interval: Duration::from_secs(10),
            })
            .start(move |table| {
                let _ = tx.send(table.clone());
                if let Some(handle) = callback_slot.lock().unwrap().as_ref() {
                    handle.stop();
                }
            });
        *slot.lock().unwrap() = Some(handle);

        let table = rx.recv().await.unwrap();
        assert_eq!(table.get("AAPL").unwrap().last_price, 242.4);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(provider.fetch_calls(), 1);
        assert!(slot.lock().unwrap().as_ref().unwrap().is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_inside_update() {
        let provider = Arc::new(
            ScriptedProvider::new().with_response("AAPL", ScriptedResponse::closes("Apple Inc", &[240.0, 242.4])),
        );
        let slot: Arc<Mutex<Option<AggregatorHandle>>> = Arc::new(Mutex::new(None));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let callback_slot = Arc::clone(&slot);
        let handle = QuoteAggregator::new(provider.clone(), ["AAPL"]).start(move |table| {
            let _ = tx.send(table.clone());
            let taken = callback_slot.lock().unwrap().take();
            drop(taken);
        });
        *slot.lock().unwrap() = Some(handle);

        rx.recv().await.unwrap();
        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(provider.fetch_calls(), 1);
        assert!(slot.lock().unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_polling() {
        let provider = Arc::new(
            ScriptedProvider::new().with_response("AAPL", ScriptedResponse::closes("Apple Inc", &[240.0, 242.4])),
        );

        let aggregator = QuoteAggregator::new(provider.clone(), ["AAPL"]).with_config(AggregatorConfig {
            poll_interval: Duration::from_secs(10),
        });
        let (handle, mut rx) = start_collecting(aggregator);
        rx.recv().await.unwrap();
        drop(handle);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(provider.fetch_calls(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_company_name_keeps_known_name() {
        let provider = ScriptedProvider::new().with_response("NVDA", ScriptedResponse::closes("", &[120.0, 126.0]));
        let prior: QuoteTable = [quote("NVDA", 119.0, 0.0, "NVIDIA Corp")].into_iter().collect();

        let aggregator = QuoteAggregator::new(Arc::new(provider), ["nvda", "NVDA"]).with_initial_table(prior);
        assert_eq!(aggregator.symbols(), ["NVDA".to_string()]);
        let (handle, mut rx) = start_collecting(aggregator);

        let table = rx.recv().await.unwrap();
        let nvda = table.get("NVDA").unwrap();
        assert_eq!(nvda.company_name, "NVIDIA Corp");
        assert!((nvda.percent_change - 5.0).abs() < 1e-9);
        handle.stop();
    }
}
