//! Paired actual/predicted price paths.

use rand::Rng;
use serde::{Deserialize, Serialize};
use stockdash_core::{DashboardContext, GenerationError, IndexPoint, Recommendation, Timeframe};
use tracing::debug;

use crate::plan::SamplingPlan;
use crate::price::round_price;
use crate::walk::walk_points;

/// Predicted deviation relative to the actual walk's volatility.
pub const PREDICTION_DAMPING: f64 = 0.5;

/// Range a base price is drawn from when the caller has none.
const DEMO_BASE_RANGE: std::ops::Range<f64> = 100.0..300.0;

/// Actual and predicted lines over the same timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSeries {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub actual: Vec<IndexPoint>,
    pub predicted: Vec<IndexPoint>,
    pub current_price: f64,
    pub predicted_price: f64,
    pub recommendation: Recommendation,
}

impl PredictionSeries {
    /// Predicted move of the last point, in percent.
    pub fn expected_change_pct(&self) -> f64 {
        (self.predicted_price - self.current_price) / self.current_price * 100.0
    }
}

/// Build the actual walk and a predicted line re-based on every actual point.
///
/// With `base_price = None` the walk starts from a price drawn in `[100, 300)`.
pub fn build_prediction<R: Rng + ?Sized>(
    ctx: &DashboardContext,
    base_price: Option<f64>,
    rng: &mut R,
) -> Result<PredictionSeries, GenerationError> {
    let base_price = match base_price {
        Some(price) => price,
        None => rng.gen_range(DEMO_BASE_RANGE),
    };
    let plan = SamplingPlan::resolve(ctx.timeframe, ctx.now)?;
    let actual = walk_points(base_price, &plan, &mut *rng)?;

    let deviation = ctx.timeframe.volatility() * PREDICTION_DAMPING;
    let predicted: Vec<IndexPoint> = actual
        .iter()
        .map(|point| {
            let trend: f64 = rng.gen_range(-0.5..0.5);
            IndexPoint::new(point.timestamp, round_price(point.value * (1.0 + trend * deviation)))
        })
        .collect();

    let fallback = round_price(base_price);
    let current_price = actual.last().map(|p| p.value).unwrap_or(fallback);
    let predicted_price = predicted.last().map(|p| p.value).unwrap_or(fallback);
    let recommendation = Recommendation::classify(current_price, predicted_price)?;

    debug!(
        "Prediction for {} ({}): {:.2} -> {:.2}, {}",
        ctx.symbol, ctx.timeframe, current_price, predicted_price, recommendation
    );

    Ok(PredictionSeries {
        symbol: ctx.symbol.clone(),
        timeframe: ctx.timeframe,
        actual,
        predicted,
        current_price,
        predicted_price,
        recommendation,
    })
}

/// Regenerate `previous` for another timeframe, continuing from its current price.
pub fn rebase_prediction<R: Rng + ?Sized>(
    previous: &PredictionSeries,
    timeframe: Timeframe,
    ctx: &DashboardContext,
    rng: &mut R,
) -> Result<PredictionSeries, GenerationError> {
    debug!(
        "Re-basing {} from {} to {} at {:.2}",
        previous.symbol, previous.timeframe, timeframe, previous.current_price
    );
    build_prediction(&ctx.with_timeframe(timeframe), Some(previous.current_price), rng)
}
