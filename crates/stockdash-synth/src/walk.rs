//! Bounded random-walk price path generator.

use rand::Rng;
use stockdash_core::{Bar, GenerationError, IndexPoint};

use crate::plan::SamplingPlan;
use crate::price::round_price;

/// Output shape of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    /// Full OHLC bars
    Ohlc,
    /// Close values only
    Scalar,
}

/// Result of a walk in the requested shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Walk {
    Ohlc(Vec<Bar>),
    Scalar(Vec<IndexPoint>),
}

impl Walk {
    pub fn len(&self) -> usize {
        match self {
            Walk::Ohlc(bars) => bars.len(),
            Walk::Scalar(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_bars(self) -> Option<Vec<Bar>> {
        match self {
            Walk::Ohlc(bars) => Some(bars),
            Walk::Scalar(_) => None,
        }
    }

    pub fn into_points(self) -> Option<Vec<IndexPoint>> {
        match self {
            Walk::Scalar(points) => Some(points),
            Walk::Ohlc(_) => None,
        }
    }
}

/// Lazily walks a sampling plan, one bar per emitted slot.
///
/// Weekend slots of a weekend-skipping plan are passed over without drawing
/// from the RNG or moving the price.
struct PriceWalker<'a, R: Rng + ?Sized> {
    plan: &'a SamplingPlan,
    rng: &'a mut R,
    slot: usize,
    base: f64,
    last_close: f64,
    volatility: f64,
}

impl<'a, R: Rng + ?Sized> PriceWalker<'a, R> {
    fn new(base_price: f64, plan: &'a SamplingPlan, rng: &'a mut R) -> Self {
        Self {
            plan,
            rng,
            slot: 0,
            base: base_price,
            last_close: base_price,
            volatility: plan.timeframe.volatility(),
        }
    }
}

impl<R: Rng + ?Sized> Iterator for PriceWalker<'_, R> {
    type Item = Bar;

    fn next(&mut self) -> Option<Bar> {
        while self.slot < self.plan.point_count {
            let time = self.plan.start + self.plan.interval * self.slot as i32;
            self.slot += 1;
            if !self.plan.is_emitted(&time) {
                continue;
            }

            let trend: f64 = self.rng.gen_range(-0.5..0.5);
            let change = self.base * self.volatility * trend;
            let open = self.last_close;
            let high = open + change.abs();
            let low = open - change.abs();
            let close = open + change;

            self.last_close = close;
            self.base = close;

            return Some(Bar::new(
                time.timestamp_millis(),
                round_price(open),
                round_price(high),
                round_price(low),
                round_price(close),
            ));
        }
        None
    }
}

fn check_base_price(base_price: f64) -> Result<(), GenerationError> {
    if base_price.is_finite() && base_price > 0.0 {
        Ok(())
    } else {
        Err(GenerationError::InvalidBasePrice(base_price))
    }
}

/// Walk `plan` from `base_price`, producing bars or close points.
pub fn walk<R: Rng + ?Sized>(
    base_price: f64,
    plan: &SamplingPlan,
    mode: WalkMode,
    rng: &mut R,
) -> Result<Walk, GenerationError> {
    Ok(match mode {
        WalkMode::Ohlc => Walk::Ohlc(walk_bars(base_price, plan, rng)?),
        WalkMode::Scalar => Walk::Scalar(walk_points(base_price, plan, rng)?),
    })
}

/// Walk `plan` producing OHLC bars.
pub fn walk_bars<R: Rng + ?Sized>(
    base_price: f64,
    plan: &SamplingPlan,
    rng: &mut R,
) -> Result<Vec<Bar>, GenerationError> {
    check_base_price(base_price)?;
    Ok(PriceWalker::new(base_price, plan, rng).collect())
}

/// Walk `plan` keeping only the close of each step.
pub fn walk_points<R: Rng + ?Sized>(
    base_price: f64,
    plan: &SamplingPlan,
    rng: &mut R,
) -> Result<Vec<IndexPoint>, GenerationError> {
    check_base_price(base_price)?;
    Ok(PriceWalker::new(base_price, plan, rng)
        .map(|bar| IndexPoint::new(bar.timestamp, bar.close))
        .collect())
}
