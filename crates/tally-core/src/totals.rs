//! # Order Totals
//!
//! Aggregates the subtotal and applied adjustments, and projects them into
//! the ordered line list handed to checkout.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartSnapshot ─┬─► PricingEngine::compute_subtotal ──► subtotal         │
//! │  Catalog ──────┤                                                        │
//! │                └─► AdjustmentRegistry::apply_all ───► adjustments       │
//! │                                                                         │
//! │  OrderTotals::build(subtotal, adjustments)                              │
//! │      total = subtotal + Σ adjustment.amount   (exact, unrounded)        │
//! │                                                                         │
//! │  OrderTotals::checkout_handoff(items, catalog)                          │
//! │      item0 = "Tote bag|5.00"        one per cart line, cart order       │
//! │      item1 = "Sticker|2.00"                                             │
//! │      item2 = "Ontario taxes at 13%:|1.30"   one per adjustment          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::adjustments::Adjustment;
use crate::error::{PricingError, PricingResult};
use crate::format::{format_minor, format_money, round_to_minor};
use crate::money::Money;
use crate::pricing::PricingEngine;
use crate::registry::{AdjustmentRegistry, AppliedAdjustments};
use crate::snapshot::{CartSnapshot, Catalog};
use crate::types::LineItem;

/// Subtotal, ordered adjustments and grand total of one computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub adjustments: Vec<Adjustment>,
    #[ts(as = "String")]
    pub total: Decimal,
}

impl OrderTotals {
    /// Combines a subtotal with the adjustments that applied.
    ///
    /// The total is recomputed from the adjustments themselves, so it always
    /// equals `subtotal + Σ amount`.
    pub fn build(subtotal: Money, applied: AppliedAdjustments) -> PricingResult<Self> {
        let total = applied
            .adjustments
            .iter()
            .try_fold(subtotal.to_decimal(), |total, adjustment| {
                total.checked_add(adjustment.amount)
            })
            .ok_or(PricingError::AmountOverflow {
                context: "order total",
            })?;

        Ok(OrderTotals {
            subtotal,
            adjustments: applied.adjustments,
            total,
        })
    }

    /// Runs the full pipeline for one cart.
    pub fn compute(
        cart: &CartSnapshot,
        catalog: &Catalog,
        registry: &AdjustmentRegistry,
    ) -> PricingResult<Self> {
        let subtotal = PricingEngine::compute_subtotal(cart.items(), catalog)?;
        let applied = registry.apply_all(cart.items(), catalog)?;
        let totals = Self::build(subtotal, applied)?;

        debug!(
            lines = cart.len(),
            %subtotal,
            adjustments = totals.adjustments.len(),
            total = %totals.total,
            "order totals computed"
        );

        Ok(totals)
    }

    /// Σ adjustment amounts.
    pub fn adjustments_total(&self) -> Decimal {
        self.adjustments.iter().map(|a| a.amount).sum()
    }

    /// The total rounded to whole cents, half away from zero.
    pub fn rounded_total(&self) -> PricingResult<i64> {
        round_to_minor(self.total)
    }

    /// Display strings for the receipt footer.
    pub fn formatted(&self) -> FormattedTotals {
        FormattedTotals {
            subtotal: format_money(self.subtotal),
            adjustments: self
                .adjustments
                .iter()
                .map(|a| CheckoutLine::new(a.description.clone(), a.formatted_amount()))
                .collect(),
            total: format_minor(self.total),
        }
    }

    /// Ordered line list for the checkout collaborator.
    ///
    /// Cart lines come first, in cart order, each with the product name and
    /// its formatted **unit** price. Adjustments follow in registry order.
    pub fn checkout_handoff(
        &self,
        items: &[LineItem],
        catalog: &Catalog,
    ) -> PricingResult<CheckoutHandoff> {
        let mut lines = Vec::with_capacity(items.len() + self.adjustments.len());

        for item in items {
            let product = catalog.require(&item.product_id)?;
            lines.push(CheckoutLine::new(
                product.name.clone(),
                format_money(product.unit_price),
            ));
        }
        lines.extend(
            self.adjustments
                .iter()
                .map(|a| CheckoutLine::new(a.description.clone(), a.formatted_amount())),
        );

        Ok(CheckoutHandoff { lines })
    }
}

/// Receipt strings for an [`OrderTotals`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub adjustments: Vec<CheckoutLine>,
    pub total: String,
}

/// One `{label, formatted amount}` entry of the checkout handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CheckoutLine {
    pub label: String,
    pub amount: String,
}

impl CheckoutLine {
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        CheckoutLine {
            label: label.into(),
            amount: amount.into(),
        }
    }

    /// Wire form posted to the checkout page: `label|amount`.
    pub fn encode(&self) -> String {
        format!("{}|{}", self.label, self.amount)
    }
}

/// Ordered line list consumed by the checkout collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CheckoutHandoff {
    pub lines: Vec<CheckoutLine>,
}

impl CheckoutHandoff {
    /// Form fields `item0`, `item1`, ... carrying the encoded lines.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(n, line)| (format!("item{n}"), line.encode()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
