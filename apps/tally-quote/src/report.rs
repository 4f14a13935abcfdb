//! Quote report: the priced cart in a form fit for stdout.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Snapshots + registry ──► QuoteReport::build                            │
//! │                               │                                         │
//! │               ┌───────────────┴───────────────┐                         │
//! │               ▼                               ▼                         │
//! │        Display                          serde_json                      │
//! │        receipt for a terminal           report for another service     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tally_core::format::format_money;
use tally_core::{
    AdjustmentRegistry, CatalogEntry, CheckoutHandoff, FormattedTotals, Jurisdiction,
    JurisdictionOption, LineTotal, OrderTotals, PricingEngine, PricingResult,
};

use crate::loader::Snapshots;

/// Everything computed for one quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteReport {
    pub generated_at: DateTime<Utc>,
    pub jurisdiction: Jurisdiction,
    pub jurisdiction_options: Vec<JurisdictionOption>,
    pub catalog: Vec<CatalogEntry>,
    pub lines: Vec<LineTotal>,
    pub totals: OrderTotals,
    pub formatted: FormattedTotals,
    pub handoff: CheckoutHandoff,
}

impl QuoteReport {
    /// Prices the cart against `jurisdiction` with the given registry.
    pub fn build(
        snapshots: &Snapshots,
        jurisdiction: &Jurisdiction,
        registry: &AdjustmentRegistry,
    ) -> PricingResult<Self> {
        let items = snapshots.cart.items();
        let totals = OrderTotals::compute(&snapshots.cart, &snapshots.catalog, registry)?;
        let handoff = totals.checkout_handoff(items, &snapshots.catalog)?;

        Ok(QuoteReport {
            generated_at: Utc::now(),
            jurisdiction: jurisdiction.clone(),
            jurisdiction_options: snapshots.jurisdictions.options(&jurisdiction.code),
            catalog: snapshots.catalog.listing()?,
            lines: PricingEngine::line_totals(items, &snapshots.catalog)?,
            formatted: totals.formatted(),
            totals,
            handoff,
        })
    }
}

/// Plain-text receipt.
impl fmt::Display for QuoteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Products")?;
        for entry in &self.catalog {
            writeln!(
                f,
                "  {:<30} {:>12} {:>12}",
                entry.name, entry.price, entry.margin
            )?;
        }

        if self.lines.is_empty() {
            return writeln!(f, "\nYour cart is empty.");
        }

        writeln!(f, "\nYour cart")?;
        for line in &self.lines {
            writeln!(
                f,
                "  {:<30} x{:<5} {:>12}",
                line.name,
                line.quantity,
                format_money(line.line_total)
            )?;
        }

        writeln!(f, "  {:>37} {:>12}", "Subtotal:", self.formatted.subtotal)?;
        for adjustment in &self.formatted.adjustments {
            writeln!(f, "  {:>37} {:>12}", adjustment.label, adjustment.amount)?;
        }
        writeln!(f, "  {:>37} {:>12}", "Total:", self.formatted.total)?;

        writeln!(f, "\nCalculate taxes for purchase from")?;
        for option in &self.jurisdiction_options {
            let marker = if option.selected { '*' } else { ' ' };
            writeln!(f, "  {marker} {:<4} {}", option.code, option.display_name)?;
        }

        writeln!(f, "\nCheckout")?;
        for (field, value) in self.handoff.form_fields() {
            writeln!(f, "  {field}={value}")?;
        }

        Ok(())
    }
}
