//! Text and CSV rendering for series and quotes.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::io;
use stockdash_core::types::{Quote, QuoteTable};
use stockdash_synth::{format_change, percent_change, CandleSeries, IndexSeries, PredictionSeries};

const RULE: &str = "───────────────────────────────────────────────────────────\n";

fn format_time(timestamp: i64, offset: &FixedOffset) -> String {
    match DateTime::from_timestamp_millis(timestamp) {
        Some(dt) => dt.with_timezone(offset).format("%Y-%m-%d %H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Candlestick table followed by a one-line summary.
pub fn render_candles(series: &CandleSeries, offset: &FixedOffset) -> String {
    let mut s = String::new();

    s.push_str(&format!("{} {} ({} bars)\n", series.symbol, series.timeframe, series.len()));
    s.push_str(RULE);
    s.push_str(&format!(
        "  {:<16}  {:>10}  {:>10}  {:>10}  {:>10}\n",
        "Time", "Open", "High", "Low", "Close"
    ));
    for bar in &series.bars {
        s.push_str(&format!(
            "  {:<16}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}\n",
            format_time(bar.timestamp, offset),
            bar.open,
            bar.high,
            bar.low,
            bar.close
        ));
    }
    s.push_str(RULE);

    match (series.bars.first(), series.bars.last()) {
        (Some(first), Some(last)) => {
            let change = if first.open != 0.0 {
                (last.close - first.open) / first.open * 100.0
            } else {
                0.0
            };
            let high = series.bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
            let low = series.bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
            s.push_str(&format!(
                "  Last close: {}  {}   High: {}  Low: {}\n",
                format_price(last.close),
                format_change(change),
                format_price(high),
                format_price(low)
            ));
        }
        _ => s.push_str("  No bars in this window\n"),
    }

    s
}

/// Index cards, one line per index.
pub fn render_indices(series: &[IndexSeries]) -> String {
    let mut s = String::new();
    s.push_str("MARKET OVERVIEW\n");
    s.push_str(RULE);
    for index in series {
        let arrow = if index.is_positive() { "▲" } else { "▼" };
        s.push_str(&format!(
            "  {:<12} {:>12.2}  {:>8} {}  ({} points)\n",
            index.name,
            index.last_value,
            format_change(index.percent_change),
            arrow,
            index.points.len()
        ));
    }
    s
}

/// Actual vs predicted table with the resulting recommendation.
pub fn render_prediction(prediction: &PredictionSeries, offset: &FixedOffset) -> String {
    let mut s = String::new();

    s.push_str(&format!(
        "{} {} prediction ({} points)\n",
        prediction.symbol,
        prediction.timeframe,
        prediction.actual.len()
    ));
    s.push_str(RULE);
    s.push_str(&format!("  {:<16}  {:>10}  {:>10}\n", "Time", "Actual", "Predicted"));
    for (actual, predicted) in prediction.actual.iter().zip(&prediction.predicted) {
        s.push_str(&format!(
            "  {:<16}  {:>10.2}  {:>10.2}\n",
            format_time(actual.timestamp, offset),
            actual.value,
            predicted.value
        ));
    }
    s.push_str(RULE);
    s.push_str(&format!("  Current price:    {}\n", format_price(prediction.current_price)));
    s.push_str(&format!(
        "  Predicted price:  {} ({})\n",
        format_price(prediction.predicted_price),
        format_change(prediction.expected_change_pct())
    ));
    s.push_str(&format!("  Period change:    {}\n", format_change(percent_change(&prediction.actual))));
    s.push_str(&format!("  Recommendation:   {}\n", prediction.recommendation));

    s
}

fn quote_line(quote: &Quote) -> String {
    if quote.last_price == 0.0 {
        return format!("  {:<6} {:<24} {:>10}  {:>8}", quote.symbol, quote.company_name, "--", "--");
    }
    let arrow = if quote.is_up() {
        "▲"
    } else if quote.is_down() {
        "▼"
    } else {
        " "
    };
    format!(
        "  {:<6} {:<24} {:>10}  {:>8} {}",
        quote.symbol,
        quote.company_name,
        format_price(quote.last_price),
        format_change(quote.percent_change),
        arrow
    )
}

/// Watchlist cards for `symbols`, in that order.
pub fn render_quote_board(table: &QuoteTable, symbols: &[String]) -> String {
    let mut s = String::new();
    s.push_str("WATCHLIST\n");
    s.push_str(RULE);
    for symbol in symbols {
        let line = match table.get(symbol) {
            Some(quote) => quote_line(quote),
            None => quote_line(&Quote::placeholder(symbol.as_str())),
        };
        s.push_str(&line);
        s.push('\n');
    }
    s
}

/// Single scrolling-banner line; symbols without a price yet are left out.
pub fn render_banner(table: &QuoteTable, symbols: &[String]) -> String {
    symbols
        .iter()
        .filter_map(|symbol| table.get(symbol))
        .filter(|quote| quote.last_price != 0.0)
        .map(|quote| {
            format!(
                "{} {} {}",
                quote.symbol,
                format_price(quote.last_price),
                format_change(quote.percent_change)
            )
        })
        .collect::<Vec<_>>()
        .join("  |  ")
}

#[derive(Serialize)]
struct IndexRow<'a> {
    name: &'a str,
    timestamp: i64,
    value: f64,
}

#[derive(Serialize)]
struct PredictionRow {
    timestamp: i64,
    actual: f64,
    predicted: f64,
}

/// Write bars as `timestamp,open,high,low,close` rows.
pub fn write_candles_csv<W: io::Write>(series: &CandleSeries, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for bar in &series.bars {
        wtr.serialize(bar)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write every index as `name,timestamp,value` rows.
pub fn write_indices_csv<W: io::Write>(series: &[IndexSeries], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for index in series {
        for point in &index.points {
            wtr.serialize(IndexRow {
                name: &index.name,
                timestamp: point.timestamp,
                value: point.value,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write paired points as `timestamp,actual,predicted` rows.
pub fn write_prediction_csv<W: io::Write>(prediction: &PredictionSeries, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (actual, predicted) in prediction.actual.iter().zip(&prediction.predicted) {
        wtr.serialize(PredictionRow {
            timestamp: actual.timestamp,
            actual: actual.value,
            predicted: predicted.value,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
