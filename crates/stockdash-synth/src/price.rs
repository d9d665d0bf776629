//! Price rounding.

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Round a price to the cent, halves away from zero.
pub fn round_price(price: f64) -> f64 {
    Decimal::from_f64(price)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_at_cent() {
        // Exact binary midpoints go up, not to even.
        assert_eq!(round_price(0.125), 0.13);
        assert_eq!(round_price(10.375), 10.38);
        assert_eq!(round_price(246.814), 246.81);
        assert_eq!(round_price(246.816), 246.82);
        assert_eq!(round_price(100.0), 100.0);
    }

    #[test]
    fn test_non_finite_passes_through() {
        assert!(round_price(f64::NAN).is_nan());
        assert_eq!(round_price(f64::INFINITY), f64::INFINITY);
    }
}
