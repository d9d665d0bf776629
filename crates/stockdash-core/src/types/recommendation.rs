//! Buy/Hold/Sell signal derived from a predicted price.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GenerationError;

/// Percentage move a prediction must exceed before it becomes actionable.
pub const ACTION_THRESHOLD_PCT: f64 = 1.0;

/// Trading signal shown next to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl Recommendation {
    /// Classify the move from `current` to `predicted`.
    ///
    /// A move strictly above +1% is `Buy`, strictly below -1% is `Sell`,
    /// anything in between (boundaries included) is `Hold`.
    pub fn classify(current: f64, predicted: f64) -> Result<Self, GenerationError> {
        let valid = |p: f64| p.is_finite() && p > 0.0;
        if !valid(current) || !valid(predicted) {
            return Err(GenerationError::InvalidPrice { current, predicted });
        }

        let delta_pct = (predicted - current) / current * 100.0;
        Ok(if delta_pct > ACTION_THRESHOLD_PCT {
            Recommendation::Buy
        } else if delta_pct < -ACTION_THRESHOLD_PCT {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
