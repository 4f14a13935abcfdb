//! # Money Module
//!
//! Provides the `Money` type for catalog prices and subtotals, and the exact
//! percentage helper used by every adjustment strategy.
//!
//! ## Two Kinds of Amount
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Money (i64 cents)                 Decimal (exact minor units)          │
//! │  ──────────────────                ───────────────────────────          │
//! │  unit price, unit cost             tax amount   1000 × 14.975% = 149.75 │
//! │  line total, subtotal              discount     10001 × 10%    = 1000.1 │
//! │  always a whole number of cents    may carry fractional cents           │
//! │                                                                         │
//! │  Neither is ever rounded inside the core. Rounding to whole cents      │
//! │  happens once, when an amount is formatted for display or handoff.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let tote_bag = Money::from_cents(500);
//! let line = tote_bag.checked_multiply_quantity(2).unwrap();
//! assert_eq!(line.to_string(), "$10.00");
//! ```

use std::fmt;
use std::ops::{Add, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};

// =============================================================================
// Money
// =============================================================================

/// Whole cents. Catalog prices, costs, line totals and subtotals.
///
/// Signed, so a product sold below cost shows a negative margin. The pricing
/// path only uses the `checked_*` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// The 0..=99 cents remainder, without sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Line amount for `qty` units, or `None` if it does not fit in an i64.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let sticker = Money::from_cents(200);
    /// assert_eq!(sticker.checked_multiply_quantity(3), Some(Money::from_cents(600)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(qty)).map(Money)
    }

    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    #[inline]
    pub fn checked_sub(&self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Returns the amount as an exact decimal number of cents.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Computes `self × percent / 100` exactly, in cents.
    ///
    /// No rounding is applied: 10% of 10001 cents is 1000.1 cents. The result
    /// is rounded only when it is formatted.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tally_core::money::Money;
    ///
    /// let tax = Money::from_cents(1000).percentage(Decimal::new(14975, 3)).unwrap();
    /// assert_eq!(tax, Decimal::new(14975, 2)); // 149.75 cents
    /// ```
    pub fn percentage(&self, percent: Decimal) -> PricingResult<Decimal> {
        self.to_decimal()
            .checked_mul(percent)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(PricingError::AmountOverflow {
                context: "percentage",
            })
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `$12.00`, `-$5.50`. For logs and strategy labels only; receipt and
/// handoff amounts go through [`crate::format::format_minor`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "${}.{:02}", self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Unchecked; test fixtures only. Library code uses the `checked_*` operations.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollars_and_cents_part() {
        let threshold = Money::from_cents(10_050);
        assert_eq!(threshold.dollars(), 100);
        assert_eq!(threshold.cents_part(), 50);

        let refund = Money::from_cents(-1_205);
        assert_eq!(refund.dollars(), -12);
        assert_eq!(refund.cents_part(), 5);
    }

    #[test]
    fn test_display_for_labels() {
        assert_eq!(Money::from_cents(10_000).to_string(), "$100.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_margin_can_go_negative() {
        let price = Money::from_cents(300);
        let cost = Money::from_cents(450);

        assert_eq!(price - cost, Money::from_cents(-150));
        assert!((price - cost).is_negative());
        assert_eq!(price + cost, Money::from_cents(750));
    }

    #[test]
    fn test_checked_operations() {
        let hoodie = Money::from_cents(4_500);

        assert_eq!(hoodie.checked_multiply_quantity(0), Some(Money::zero()));
        assert_eq!(hoodie.checked_multiply_quantity(999), Some(Money::from_cents(4_495_500)));
        assert_eq!(hoodie.checked_add(Money::from_cents(500)), Some(Money::from_cents(5_000)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(hoodie.checked_sub(Money::from_cents(5_000)), Some(Money::from_cents(-500)));
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
    }

    #[test]
    fn test_percentage_is_exact() {
        // 10% of $100.01 is 1000.1 cents, not 1000
        let discount = Money::from_cents(10001)
            .percentage(Decimal::TEN)
            .unwrap();
        assert_eq!(discount, Decimal::new(10001, 1));

        // 13% of $10.00
        let tax = Money::from_cents(1000)
            .percentage(Decimal::from(13))
            .unwrap();
        assert_eq!(tax, Decimal::from(130));

        assert!(Money::from_cents(1000).percentage(Decimal::ZERO).unwrap().is_zero());
    }

    #[test]
    fn test_percentage_overflow() {
        let err = Money::from_cents(i64::MAX)
            .percentage(Decimal::MAX)
            .unwrap_err();
        assert_eq!(err, PricingError::AmountOverflow { context: "percentage" });
    }
}
