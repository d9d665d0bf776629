//! Live quote watch command implementation.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use stockdash_config::AppConfig;
use stockdash_core::{DashboardContext, QuoteProvider, QuoteTable, Timeframe};
use stockdash_live::{AggregatorConfig, QuoteAggregator};
use stockdash_monitor::{render_banner, render_quote_board};
use tokio::sync::mpsc;
use tracing::info;

use super::{common, offline};
use crate::cli::{OutputFormat, WatchArgs};

pub async fn run(args: WatchArgs, config: &AppConfig) -> Result<()> {
    // Cards show the watchlist, the banner adds a few more names
    let (cards, banner) = if args.symbols.is_empty() {
        (config.aggregator.tracked_symbols.clone(), config.aggregator.banner_symbols.clone())
    } else {
        (args.symbols.clone(), args.symbols.clone())
    };
    let symbols: Vec<String> = cards.iter().chain(&banner).cloned().collect();

    let provider: Arc<dyn QuoteProvider> = if args.offline {
        let ctx = DashboardContext::at_local_now(stockdash_core::DEFAULT_SYMBOL, Timeframe::Intraday);
        Arc::new(offline::OfflineProvider::new(&ctx, common::rng(args.seed)))
    } else {
        common::live_provider(config)?
    };

    let poll_interval = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.aggregator.poll_interval());

    let aggregator = QuoteAggregator::new(provider, symbols)
        .with_config(AggregatorConfig { poll_interval });
    let tracked = aggregator.symbols().to_vec();
    let cards = normalize(&cards);
    let banner = normalize(&banner);

    let (tx, mut rx) = mpsc::unbounded_channel::<QuoteTable>();
    let handle = aggregator.start(move |table| {
        let _ = tx.send(table.clone());
    });

    info!("Watching {} (Ctrl+C to stop)", tracked.join(", "));

    let mut updates = 0usize;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            update = rx.recv() => {
                let Some(table) = update else { break };
                updates += 1;

                match args.output {
                    OutputFormat::Json => println!("{}", serde_json::to_string(&table)?),
                    _ => {
                        print!("{}", render_quote_board(&table, &cards));
                        println!("{}", render_banner(&table, &banner));
                        println!();
                    }
                }

                if args.cycles.is_some_and(|limit| updates >= limit) {
                    break;
                }
            }
        }
    }

    handle.join().await;
    info!("Received {} updates", updates);
    Ok(())
}

fn normalize(symbols: &[String]) -> Vec<String> {
    symbols
        .iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}
