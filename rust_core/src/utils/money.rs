//! Cent-precision helpers for stakes and payouts.
//!
//! Odds math runs in `f64`; amounts shown to a bettor are rounded to the cent
//! at the boundary, and formatted through [`Money`].
//!
//! ```rust
//! use parlay_core::utils::money::{Money, round_to_cents};
//!
//! let payout = Money::from_dollars(36.446);
//! assert_eq!(payout.cents(), 3645);
//! assert_eq!(payout.to_string(), "$36.45");
//! assert_eq!(round_to_cents(190.909), 190.91);
//! ```

use std::fmt;

/// Amount of money stored as whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Create from dollars (rounds to nearest cent)
    #[inline]
    pub fn from_dollars(dollars: f64) -> Self {
        Self {
            cents: to_cents(dollars),
        }
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.cents
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cents < 0 {
            write!(f, "-${:.2}", (-self.cents) as f64 / 100.0)
        } else {
            write!(f, "${:.2}", self.cents as f64 / 100.0)
        }
    }
}

/// Convert dollars to cents (rounds to nearest cent)
#[inline]
pub fn to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// Round a dollar amount to the nearest cent
#[inline]
pub fn round_to_cents(dollars: f64) -> f64 {
    (dollars * 100.0).round() / 100.0
}

/// Round to two decimal places; same rule as cents, used for odds and
/// percentages in reports.
#[inline]
pub fn round2(value: f64) -> f64 {
    round_to_cents(value)
}
