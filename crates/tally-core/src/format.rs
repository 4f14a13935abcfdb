//! # Presentation Formatting
//!
//! The single place where exact minor-unit amounts are rounded.
//!
//! ```text
//! exact cents (Decimal) ──► ÷ 100 ──► round half away from zero (2 dp) ──► "1,234.57"
//! ```
//!
//! Output matches the receipt convention of the storefront: `.` as decimal
//! point, `,` between thousands, a leading `-` for negative amounts, and no
//! currency symbol.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{PricingError, PricingResult};
use crate::money::Money;

/// Formats an exact amount of cents as a two-decimal major-unit string.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tally_core::format::format_minor;
///
/// assert_eq!(format_minor(Decimal::from(123456789)), "1,234,567.89");
/// assert_eq!(format_minor(Decimal::new(-10001, 1)), "-10.00");
/// assert_eq!(format_minor(Decimal::new(149_75, 2)), "1.50");
/// ```
pub fn format_minor(amount: Decimal) -> String {
    let mut major = (amount / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    // -0.004 rounds to zero and prints without a sign
    let negative = major.is_sign_negative() && !major.is_zero();
    major.set_sign_positive(true);
    major.rescale(2);

    let digits = major.to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        group_thousands(whole),
        fraction
    )
}

/// Formats a whole number of cents.
pub fn format_money(amount: Money) -> String {
    format_minor(amount.to_decimal())
}

/// Rounds an exact amount of cents to whole cents, half away from zero.
pub fn round_to_minor(amount: Decimal) -> PricingResult<i64> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::AmountOverflow {
            context: "rounded amount",
        })
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
