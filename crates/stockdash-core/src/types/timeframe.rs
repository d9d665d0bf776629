//! Display timeframe selected by the user.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GenerationError;

/// Display window governing sampling density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// One trading day of 5 minute bars
    #[serde(rename = "1D")]
    #[default]
    Intraday,
    /// Last week of hourly bars
    #[serde(rename = "1W")]
    Week,
    /// Last month of daily bars
    #[serde(rename = "1M")]
    Month,
    /// Last year of weekly bars
    #[serde(rename = "1Y")]
    Year,
}

impl Timeframe {
    /// Per-step volatility used by the random walk.
    pub fn volatility(&self) -> f64 {
        match self {
            Timeframe::Intraday => 0.002,
            Timeframe::Week => 0.005,
            Timeframe::Month => 0.01,
            Timeframe::Year => 0.02,
        }
    }

    /// Short token shown on the timeframe buttons.
    pub fn token(&self) -> &'static str {
        match self {
            Timeframe::Intraday => "1D",
            Timeframe::Week => "1W",
            Timeframe::Month => "1M",
            Timeframe::Year => "1Y",
        }
    }

    /// Get all available timeframes.
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::Intraday,
            Timeframe::Week,
            Timeframe::Month,
            Timeframe::Year,
        ]
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Timeframe {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" | "day" | "intraday" => Ok(Timeframe::Intraday),
            "1w" | "week" => Ok(Timeframe::Week),
            "1m" | "month" => Ok(Timeframe::Month),
            "1y" | "year" => Ok(Timeframe::Year),
            _ => Err(GenerationError::InvalidTimeframe(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_parse() {
        assert_eq!(Timeframe::from_str("1D").unwrap(), Timeframe::Intraday);
        assert_eq!(Timeframe::from_str("1w").unwrap(), Timeframe::Week);
        assert_eq!(Timeframe::from_str("month").unwrap(), Timeframe::Month);
        assert_eq!(Timeframe::from_str("1Y").unwrap(), Timeframe::Year);
    }

    #[test]
    fn test_unknown_token_is_invalid() {
        let err = Timeframe::from_str("5Y").unwrap_err();
        assert_eq!(err, GenerationError::InvalidTimeframe("5Y".to_string()));
    }

    #[test]
    fn test_timeframe_display() {
        assert_eq!(Timeframe::Intraday.to_string(), "1D");
        assert_eq!(Timeframe::Year.to_string(), "1Y");
    }

    #[test]
    fn test_volatility_table() {
        assert_eq!(Timeframe::Intraday.volatility(), 0.002);
        assert_eq!(Timeframe::Week.volatility(), 0.005);
        assert_eq!(Timeframe::Month.volatility(), 0.01);
        assert_eq!(Timeframe::Year.volatility(), 0.02);
    }

    #[test]
    fn test_serde_uses_tokens() {
        let json = serde_json::to_string(&Timeframe::Week).unwrap();
        assert_eq!(json, "\"1W\"");
        let parsed: Timeframe = serde_json::from_str("\"1M\"").unwrap();
        assert_eq!(parsed, Timeframe::Month);
    }
}
