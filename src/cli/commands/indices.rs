//! Market index command implementation.

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local};
use rand::Rng;
use std::time::Duration;
use stockdash_config::AppConfig;
use stockdash_core::{DashboardContext, Timeframe, DEFAULT_SYMBOL};
use stockdash_monitor::{render_indices, write_indices_csv};
use stockdash_synth::{build_indices, default_indices, IndexSeries, IndexSpec};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use super::common;
use crate::cli::{IndicesArgs, OutputFormat};

pub async fn run(args: IndicesArgs, _config: &AppConfig) -> Result<()> {
    let specs = default_indices();
    let mut rng = common::rng(args.generation.seed);

    if !args.watch {
        let now = common::reference_time(args.generation.at.as_deref())?;
        info!("Generating {} index lines over {}", specs.len(), args.generation.timeframe);
        let series = generate(&specs, args.generation.timeframe, now, &mut rng)?;
        return print(&series, args.generation.output);
    }

    let mut ticker = interval(Duration::from_secs(args.interval.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!("Refreshing {} index lines every {}s (Ctrl+C to stop)", specs.len(), args.interval.max(1));

    let mut refreshes = 0usize;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            _ = ticker.tick() => {
                // Each refresh covers the window ending at the current clock
                let now = Local::now().fixed_offset();
                let series = generate(&specs, args.generation.timeframe, now, &mut rng)?;
                print(&series, args.generation.output)?;
                refreshes += 1;

                if args.cycles.is_some_and(|limit| refreshes >= limit) {
                    break;
                }
            }
        }
    }

    info!("Rendered {} refreshes", refreshes);
    Ok(())
}

fn generate<R: Rng + ?Sized>(
    specs: &[IndexSpec],
    timeframe: Timeframe,
    now: DateTime<FixedOffset>,
    rng: &mut R,
) -> Result<Vec<IndexSeries>> {
    let ctx = DashboardContext::new(DEFAULT_SYMBOL, timeframe, now);
    Ok(build_indices(&ctx, specs, rng)?)
}

fn print(series: &[IndexSeries], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(series)?),
        OutputFormat::Csv => write_indices_csv(series, std::io::stdout().lock())?,
        OutputFormat::Text => println!("{}", render_indices(series)),
    }
    Ok(())
}
