//! Jurisdiction sales tax.

use tracing::debug;

use super::{Adjustment, AdjustmentStrategy, Evaluation};
use crate::error::PricingResult;
use crate::pricing::PricingEngine;
use crate::snapshot::Catalog;
use crate::types::{Jurisdiction, LineItem, TaxRate};

/// Charges the selected jurisdiction's rate on taxable lines.
///
/// ## Rule
/// ```text
/// taxable = Σ quantity × unit_price  (taxable products only)
/// taxable == 0  → NotApplicable
/// otherwise     → Applied("{name} taxes at {rate}%:", taxable × rate / 100)
/// ```
///
/// A cart with taxable goods in a 0% jurisdiction still gets a tax line of
/// 0.00, so the receipt shows which rate was used.
#[derive(Debug, Clone)]
pub struct TaxAdjustment {
    jurisdiction_name: String,
    rate: TaxRate,
}

impl TaxAdjustment {
    /// Captures the jurisdiction's name and rate.
    pub fn new(jurisdiction: &Jurisdiction) -> Self {
        TaxAdjustment {
            jurisdiction_name: jurisdiction.display_name.clone(),
            rate: jurisdiction.tax_rate,
        }
    }

    pub fn rate(&self) -> TaxRate {
        self.rate
    }
}

impl AdjustmentStrategy for TaxAdjustment {
    fn describe(&self) -> String {
        format!("{} taxes at {}%:", self.jurisdiction_name, self.rate)
    }

    fn evaluate(&self, items: &[LineItem], catalog: &Catalog) -> PricingResult<Evaluation> {
        let taxable = PricingEngine::compute_taxable_subtotal(items, catalog)?;
        if taxable.is_zero() {
            debug!(jurisdiction = %self.jurisdiction_name, "no taxable lines, tax not applicable");
            return Ok(Evaluation::NotApplicable);
        }

        let amount = taxable.percentage(self.rate.percent())?;
        Ok(Evaluation::Applied(Adjustment::new(self.describe(), amount)))
    }
}
