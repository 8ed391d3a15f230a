//! Odds arithmetic: American/decimal conversion, implied probability and
//! multi-leg combination.
//!
//! Every function here is pure and total for well-formed American odds.
//! An American price of exactly `0` is not a valid quote; passing one is a
//! caller contract violation and is not checked.
//!
//! ```rust
//! use parlay_core::utils::odds::{american_to_decimal, combine, payout};
//!
//! assert!((american_to_decimal(150) - 2.5).abs() < 1e-9);
//!
//! let combined = combine(&[-110, -110]);
//! assert!(combined.american_odds > 0);
//!
//! let p = payout(100.0, &[-110]);
//! assert!((p.total_payout - 190.91).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use super::money::round_to_cents;

/// Anything priced with a single American odds value (a leg, a slip
/// selection, or a bare price).
pub trait AmericanPriced {
    fn american_odds(&self) -> i32;
}

impl AmericanPriced for i32 {
    fn american_odds(&self) -> i32 {
        *self
    }
}

impl<T: AmericanPriced + ?Sized> AmericanPriced for &T {
    fn american_odds(&self) -> i32 {
        (**self).american_odds()
    }
}

/// Convert American odds to decimal odds.
#[inline]
pub fn american_to_decimal(odds: i32) -> f64 {
    if odds > 0 {
        odds as f64 / 100.0 + 1.0
    } else {
        100.0 / (odds.unsigned_abs() as f64) + 1.0
    }
}

/// Convert decimal odds back to American odds, rounded to the nearest integer.
///
/// Decimal odds of 1.0 or below (no legs) map to `0`.
#[inline]
pub fn decimal_to_american(decimal: f64) -> i32 {
    if decimal >= 2.0 {
        ((decimal - 1.0) * 100.0).round() as i32
    } else if decimal > 1.0 {
        (-100.0 / (decimal - 1.0)).round() as i32
    } else {
        0
    }
}

/// Probability implied by American odds, ignoring bookmaker margin.
#[inline]
pub fn implied_probability(odds: i32) -> f64 {
    if odds > 0 {
        100.0 / (odds as f64 + 100.0)
    } else {
        let abs_odds = odds.unsigned_abs() as f64;
        abs_odds / (abs_odds + 100.0)
    }
}

/// Combined price of a set of legs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedOdds {
    pub decimal_odds: f64,
    pub american_odds: i32,
    /// Product of the legs' implied probabilities, as a percentage (0-100).
    pub implied_probability: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub total_payout: f64,
    pub profit: f64,
}

/// Multiply decimal odds and implied probabilities across every selection.
///
/// The probability product assumes the legs are independent; it is not a
/// joint probability when legs share a game. Empty input yields all zeros.
pub fn combine<T: AmericanPriced>(selections: &[T]) -> CombinedOdds {
    if selections.is_empty() {
        return CombinedOdds::default();
    }

    let (decimal_odds, probability) = selections.iter().fold((1.0, 1.0), |(dec, prob), s| {
        let odds = s.american_odds();
        (dec * american_to_decimal(odds), prob * implied_probability(odds))
    });

    CombinedOdds {
        decimal_odds,
        american_odds: decimal_to_american(decimal_odds),
        implied_probability: probability * 100.0,
    }
}

/// Total return and profit for `stake` across the combined selections,
/// rounded to cents. Non-positive stake or no selections pay nothing.
pub fn payout<T: AmericanPriced>(stake: f64, selections: &[T]) -> Payout {
    if selections.is_empty() || stake <= 0.0 {
        return Payout::default();
    }

    let total = stake * combine(selections).decimal_odds;
    Payout {
        total_payout: round_to_cents(total),
        profit: round_to_cents(total - stake),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_american_to_decimal() {
        assert!((american_to_decimal(150) - 2.5).abs() < 1e-9);
        assert!((american_to_decimal(-200) - 1.5).abs() < 1e-9);
        assert!((american_to_decimal(-110) - 1.909_090_909).abs() < 1e-6);
        assert!((american_to_decimal(100) - 2.0).abs() < 1e-9);
        assert!((american_to_decimal(-100) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_decimal_to_american() {
        assert_eq!(decimal_to_american(2.5), 150);
        assert_eq!(decimal_to_american(1.5), -200);
        assert_eq!(decimal_to_american(2.0), 100);
        assert_eq!(decimal_to_american(1.0), 0);
        assert_eq!(decimal_to_american(0.0), 0);
    }

    #[test]
    fn test_round_trip_within_one() {
        for odds in (-1000..=-101).chain(100..=1000) {
            let back = decimal_to_american(american_to_decimal(odds));
            assert!(
                (back - odds).abs() <= 1,
                "odds {} round-tripped to {}",
                odds,
                back
            );
        }
        // -100 and +100 are the same even-money price
        assert_eq!(decimal_to_american(american_to_decimal(-100)), 100);
    }

    #[test]
    fn test_implied_probability() {
        assert_eq!(implied_probability(100), 0.5);
        assert_eq!(implied_probability(-100), 0.5);
        assert!((implied_probability(-150) - 0.6).abs() < 1e-9);
        assert!((implied_probability(150) - 0.4).abs() < 1e-9);
        for odds in [-5000, -110, 101, 2500] {
            let p = implied_probability(odds);
            assert!(p > 0.0 && p < 1.0);
        }
    }

    #[test]
    fn test_combine_two_standard_legs() {
        let combined = combine(&[-110, -110]);
        assert!((combined.decimal_odds - 3.645).abs() < 0.05);
        assert!(combined.american_odds > 0);
        assert_eq!(combined.american_odds, 264);
        let expected_prob = (110.0 / 210.0) * (110.0 / 210.0) * 100.0;
        assert!((combined.implied_probability - expected_prob).abs() < 1e-9);
    }

    #[test]
    fn test_combine_empty() {
        let combined = combine::<i32>(&[]);
        assert_eq!(combined.decimal_odds, 0.0);
        assert_eq!(combined.american_odds, 0);
        assert_eq!(combined.implied_probability, 0.0);
    }

    #[test]
    fn test_payout_single_leg() {
        let p = payout(100.0, &[-110]);
        assert!((p.total_payout - 190.9).abs() < 0.02);
        assert!((p.profit - 90.9).abs() < 0.02);
    }

    #[test]
    fn test_payout_degenerate_inputs() {
        assert_eq!(payout::<i32>(100.0, &[]), Payout::default());
        assert_eq!(payout(0.0, &[-110, 150]), Payout::default());
    }
}
