//! # Adjustments
//!
//! Pluggable rules that look at the cart and catalog and may contribute one
//! signed, named change to the order total.
//!
//! ## Strategy Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  trait AdjustmentStrategy                                               │
//! │                                                                         │
//! │  describe()              → "Ontario taxes at 13%:"                      │
//! │  evaluate(items, catalog)→ Applied(Adjustment { description, amount })  │
//! │                          → NotApplicable                                │
//! │                                                                         │
//! │  amount > 0  charge (tax, surcharge)                                    │
//! │  amount < 0  discount / credit                                          │
//! │  amount = 0  still Applied: listed on the receipt with 0.00             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! New adjustment kinds implement the trait and are registered with
//! [`crate::registry::AdjustmentRegistry`]. Subtotal and total logic never
//! change when a variant is added.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::PricingResult;
use crate::format::{format_minor, round_to_minor};
use crate::snapshot::Catalog;
use crate::types::LineItem;

mod discount;
mod tax;

pub use discount::DiscountAdjustment;
pub use tax::TaxAdjustment;

/// A named, signed change to the order total, in exact cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Adjustment {
    pub description: String,
    #[ts(as = "String")]
    pub amount: Decimal,
}

impl Adjustment {
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Adjustment {
            description: description.into(),
            amount,
        }
    }

    /// The amount rounded to whole cents, half away from zero.
    pub fn rounded_amount(&self) -> PricingResult<i64> {
        round_to_minor(self.amount)
    }

    /// The amount as shown on a receipt (`-10.00`).
    pub fn formatted_amount(&self) -> String {
        format_minor(self.amount)
    }
}

/// Outcome of evaluating one strategy.
///
/// `NotApplicable` is a distinct outcome, never encoded as a zero amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// The rule's precondition held; the adjustment is part of the order.
    Applied(Adjustment),
    /// The rule's precondition failed; nothing is listed or summed.
    NotApplicable,
}

impl Evaluation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Evaluation::Applied(_))
    }

    pub fn into_applied(self) -> Option<Adjustment> {
        match self {
            Evaluation::Applied(adjustment) => Some(adjustment),
            Evaluation::NotApplicable => None,
        }
    }
}

/// A pricing rule that may contribute one adjustment.
///
/// Implementations must be pure functions of their configuration and the
/// inputs passed to `evaluate`; the registry calls them once per computation
/// and may share them across threads.
pub trait AdjustmentStrategy: fmt::Debug + Send + Sync {
    /// Human-readable label, including any configuration captured at
    /// construction.
    fn describe(&self) -> String;

    /// Evaluates the rule against the current cart and catalog.
    ///
    /// ## Errors
    /// Propagates catalog and arithmetic failures (`UnknownProduct`,
    /// `AmountOverflow`). A failed precondition is `Ok(NotApplicable)`, not
    /// an error.
    fn evaluate(&self, items: &[LineItem], catalog: &Catalog) -> PricingResult<Evaluation>;
}
