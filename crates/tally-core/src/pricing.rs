//! # Pricing Engine
//!
//! Subtotals of a cart against the current catalog.
//!
//! ## Subtotal Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each line in cart order:                                           │
//! │      product  = catalog.require(line.product_id)   ── UnknownProduct   │
//! │      line     = product.unit_price × line.quantity ── AmountOverflow   │
//! │      subtotal += line                                                   │
//! │                                                                         │
//! │  compute_subtotal          every line                                   │
//! │  compute_taxable_subtotal  lines whose product.taxable == true          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices come from the catalog passed in, never from the moment a product
//! was added to the cart.

use serde::Serialize;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::snapshot::Catalog;
use crate::types::{LineItem, Product};

/// Pure subtotal calculations. Holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine;

impl PricingEngine {
    /// Σ quantity × unit price over every line.
    ///
    /// ## Errors
    /// - `UnknownProduct` if any line references a product missing from the catalog
    /// - `AmountOverflow` if the sum does not fit in an i64 of cents
    pub fn compute_subtotal(items: &[LineItem], catalog: &Catalog) -> PricingResult<Money> {
        sum_lines(items, catalog, |_| true)
    }

    /// Σ quantity × unit price over lines whose product is taxable.
    ///
    /// Non-taxable lines are still resolved against the catalog, so an
    /// unknown product fails here too.
    pub fn compute_taxable_subtotal(items: &[LineItem], catalog: &Catalog) -> PricingResult<Money> {
        sum_lines(items, catalog, |product| product.taxable)
    }

    /// Per-line breakdown in cart order.
    pub fn line_totals(items: &[LineItem], catalog: &Catalog) -> PricingResult<Vec<LineTotal>> {
        items
            .iter()
            .map(|item| {
                let product = catalog.require(&item.product_id)?;
                Ok(LineTotal {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    quantity: item.quantity,
                    unit_price: product.unit_price,
                    line_total: line_amount(product, item)?,
                })
            })
            .collect()
    }
}

/// One priced cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LineTotal {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

fn line_amount(product: &Product, item: &LineItem) -> PricingResult<Money> {
    product
        .unit_price
        .checked_multiply_quantity(item.quantity)
        .ok_or(PricingError::AmountOverflow {
            context: "line total",
        })
}

fn sum_lines(
    items: &[LineItem],
    catalog: &Catalog,
    include: impl Fn(&Product) -> bool,
) -> PricingResult<Money> {
    items.iter().try_fold(Money::zero(), |subtotal, item| {
        let product = catalog.require(&item.product_id)?;
        if !include(product) {
            return Ok(subtotal);
        }
        subtotal
            .checked_add(line_amount(product, item)?)
            .ok_or(PricingError::AmountOverflow {
                context: "subtotal",
            })
    })
}
