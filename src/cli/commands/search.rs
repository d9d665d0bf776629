//! Symbol search command implementation.

use anyhow::Result;
use std::sync::Arc;
use stockdash_config::AppConfig;
use stockdash_core::{DashboardContext, QuoteProvider, Timeframe, DEFAULT_SYMBOL};
use stockdash_data::search_symbols;

use super::{common, offline};
use crate::cli::{OutputFormat, SearchArgs};

pub async fn run(args: SearchArgs, config: &AppConfig) -> Result<()> {
    let provider: Arc<dyn QuoteProvider> = if args.offline {
        let ctx = DashboardContext::at_local_now(DEFAULT_SYMBOL, Timeframe::Intraday);
        Arc::new(offline::OfflineProvider::new(&ctx, common::rng(None)))
    } else {
        common::live_provider(config)?
    };

    let matches = search_symbols(provider.as_ref(), &args.query).await;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matches)?),
        _ => {
            if matches.is_empty() {
                println!("No matches for '{}'", args.query.trim());
            }
            for m in &matches {
                println!("  {:<10} {:<36} {}", m.display_symbol, m.description, m.kind);
            }
        }
    }

    Ok(())
}
