//! Series builders on top of the timeframe policy and the random walk.

mod candles;
mod indices;
mod prediction;

pub use candles::{base_price_for, build_candles, CandleSeries};
pub use indices::{build_indices, default_indices, percent_change, IndexSeries, IndexSpec};
pub use prediction::{build_prediction, rebase_prediction, PredictionSeries, PREDICTION_DAMPING};

/// Format a percentage change with an explicit sign, e.g. `+1.20%`.
pub fn format_change(pct: f64) -> String {
    let sign = if pct >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(1.2), "+1.20%");
        assert_eq!(format_change(0.0), "+0.00%");
        assert_eq!(format_change(-0.347), "-0.35%");
    }
}
