//! Prediction command implementation.

use anyhow::Result;
use stockdash_config::AppConfig;
use stockdash_core::DashboardContext;
use stockdash_data::SymbolStore;
use stockdash_monitor::{render_prediction, write_prediction_csv};
use stockdash_synth::{build_prediction, rebase_prediction, PredictionSeries};
use tracing::info;

use super::common;
use crate::cli::{OutputFormat, PredictArgs};

pub async fn run(args: PredictArgs, config: &AppConfig) -> Result<()> {
    let store = SymbolStore::new(&config.storage.state_file);
    let symbol = common::select_symbol(&store, args.symbol.as_deref());
    let now = common::reference_time(args.generation.at.as_deref())?;
    let ctx = DashboardContext::new(symbol, args.generation.timeframe, now);

    let mut rng = common::rng(args.generation.seed);
    let mut prediction = build_prediction(&ctx, args.base_price, &mut rng)?;
    report(&prediction, &ctx, args.generation.output)?;

    for timeframe in args.then {
        prediction = rebase_prediction(&prediction, timeframe, &ctx, &mut rng)?;
        report(&prediction, &ctx, args.generation.output)?;
    }

    Ok(())
}

fn report(prediction: &PredictionSeries, ctx: &DashboardContext, output: OutputFormat) -> Result<()> {
    info!(
        "{} {}: {} (expected {:.2}%)",
        prediction.symbol,
        prediction.timeframe,
        prediction.recommendation,
        prediction.expected_change_pct()
    );

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(prediction)?),
        OutputFormat::Csv => write_prediction_csv(prediction, std::io::stdout().lock())?,
        OutputFormat::Text => print!("{}", render_prediction(prediction, ctx.now.offset())),
    }
    Ok(())
}
