//! Order-size discount.

use rust_decimal::Decimal;
use tracing::debug;

use super::{Adjustment, AdjustmentStrategy, Evaluation};
use crate::error::{PricingResult, ValidationError};
use crate::money::Money;
use crate::pricing::PricingEngine;
use crate::snapshot::Catalog;
use crate::types::LineItem;
use crate::{DEFAULT_DISCOUNT_PERCENT, DEFAULT_DISCOUNT_THRESHOLD};

/// Takes a percentage off orders whose subtotal exceeds a threshold.
///
/// ## Rule
/// ```text
/// subtotal >  threshold → Applied("Discount for orders over $100", -subtotal × percent / 100)
/// subtotal <= threshold → NotApplicable
/// ```
///
/// The comparison is strict: a subtotal of exactly $100.00 gets no discount.
/// The discount is computed on the full pre-tax subtotal, taxable or not.
#[derive(Debug, Clone)]
pub struct DiscountAdjustment {
    threshold: Money,
    percent: Decimal,
}

impl DiscountAdjustment {
    /// Creates a discount rule.
    ///
    /// ## Errors
    /// - `MustBeNonNegative` for a negative threshold
    /// - `OutOfRange` for a percent outside 0..=100
    pub fn new(threshold: Money, percent: Decimal) -> Result<Self, ValidationError> {
        if threshold.is_negative() {
            return Err(ValidationError::MustBeNonNegative {
                field: "discount_threshold".to_string(),
            });
        }
        if (percent.is_sign_negative() && !percent.is_zero()) || percent > Decimal::ONE_HUNDRED {
            return Err(ValidationError::OutOfRange {
                field: "discount_percent".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(DiscountAdjustment { threshold, percent })
    }

    pub fn threshold(&self) -> Money {
        self.threshold
    }

    pub fn percent(&self) -> Decimal {
        self.percent
    }

    /// `$100` for whole-dollar thresholds, `$100.50` otherwise.
    fn threshold_label(&self) -> String {
        if self.threshold.cents_part() == 0 {
            format!("${}", self.threshold.dollars())
        } else {
            self.threshold.to_string()
        }
    }
}

/// 10% off orders over $100.
impl Default for DiscountAdjustment {
    fn default() -> Self {
        DiscountAdjustment {
            threshold: DEFAULT_DISCOUNT_THRESHOLD,
            percent: Decimal::from(DEFAULT_DISCOUNT_PERCENT),
        }
    }
}

impl AdjustmentStrategy for DiscountAdjustment {
    fn describe(&self) -> String {
        format!("Discount for orders over {}", self.threshold_label())
    }

    fn evaluate(&self, items: &[LineItem], catalog: &Catalog) -> PricingResult<Evaluation> {
        let subtotal = PricingEngine::compute_subtotal(items, catalog)?;
        if subtotal <= self.threshold {
            debug!(%subtotal, threshold = %self.threshold, "below discount threshold");
            return Ok(Evaluation::NotApplicable);
        }

        let amount = -subtotal.percentage(self.percent)?;
        Ok(Evaluation::Applied(Adjustment::new(self.describe(), amount)))
    }
}
