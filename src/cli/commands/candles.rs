//! Candlestick command implementation.

use anyhow::Result;
use stockdash_config::AppConfig;
use stockdash_core::DashboardContext;
use stockdash_data::SymbolStore;
use stockdash_monitor::{render_candles, write_candles_csv};
use stockdash_synth::{base_price_for, build_candles};
use tracing::info;

use super::common;
use crate::cli::{CandlesArgs, OutputFormat};

pub async fn run(args: CandlesArgs, config: &AppConfig) -> Result<()> {
    let store = SymbolStore::new(&config.storage.state_file);
    let symbol = common::select_symbol(&store, args.symbol.as_deref());
    let now = common::reference_time(args.generation.at.as_deref())?;
    let ctx = DashboardContext::new(symbol, args.generation.timeframe, now);

    let base_price = args.base_price.unwrap_or_else(|| base_price_for(&ctx.symbol));
    info!("Generating {} candles for {} from {:.2}", ctx.timeframe, ctx.symbol, base_price);

    let mut rng = common::rng(args.generation.seed);
    let series = build_candles(&ctx, base_price, &mut rng)?;

    match args.generation.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&series)?),
        OutputFormat::Csv => write_candles_csv(&series, std::io::stdout().lock())?,
        OutputFormat::Text => print!("{}", render_candles(&series, ctx.now.offset())),
    }

    Ok(())
}
