//! # Adjustment Registry
//!
//! Ordered collection of adjustment strategies.
//!
//! ## Apply Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  strategies: [Tax(ON 13%), Discount(>$100, 10%), ...]                   │
//! │                                                                         │
//! │  for strategy in registration order:                                    │
//! │      match strategy.evaluate(items, catalog)? {                         │
//! │          Applied(adj)  → adjustments.push(adj); total += adj.amount     │
//! │          NotApplicable → (nothing listed, nothing summed)               │
//! │      }                                                                  │
//! │                                                                         │
//! │  → AppliedAdjustments { adjustments, total }                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Registration order is the order adjustments appear on the receipt and in
//! the checkout handoff. The registry keeps no state between calls.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::adjustments::{
    Adjustment, AdjustmentStrategy, DiscountAdjustment, Evaluation, TaxAdjustment,
};
use crate::error::{PricingError, PricingResult};
use crate::snapshot::Catalog;
use crate::types::{Jurisdiction, LineItem};

/// Strategies applied in the order they were registered.
#[derive(Debug, Default)]
pub struct AdjustmentRegistry {
    strategies: Vec<Box<dyn AdjustmentStrategy>>,
}

impl AdjustmentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The storefront's default rules: jurisdiction tax, then the order-size
    /// discount.
    pub fn standard(jurisdiction: &Jurisdiction, discount: DiscountAdjustment) -> Self {
        AdjustmentRegistry::new()
            .with(TaxAdjustment::new(jurisdiction))
            .with(discount)
    }

    /// Appends a strategy.
    pub fn register(&mut self, strategy: impl AdjustmentStrategy + 'static) {
        self.strategies.push(Box::new(strategy));
    }

    /// Appends a strategy, builder style.
    pub fn with(mut self, strategy: impl AdjustmentStrategy + 'static) -> Self {
        self.register(strategy);
        self
    }

    /// Labels of every registered strategy, in order.
    pub fn describe_all(&self) -> Vec<String> {
        self.strategies.iter().map(|s| s.describe()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Evaluates every strategy in registration order.
    ///
    /// ## Errors
    /// The first strategy error aborts the computation; no partial result is
    /// returned.
    pub fn apply_all(
        &self,
        items: &[LineItem],
        catalog: &Catalog,
    ) -> PricingResult<AppliedAdjustments> {
        let mut applied = AppliedAdjustments::default();

        for strategy in &self.strategies {
            match strategy.evaluate(items, catalog)? {
                Evaluation::Applied(adjustment) => {
                    debug!(
                        description = %adjustment.description,
                        amount = %adjustment.amount,
                        "adjustment applied"
                    );
                    applied.total = applied
                        .total
                        .checked_add(adjustment.amount)
                        .ok_or(PricingError::AmountOverflow {
                            context: "adjustment total",
                        })?;
                    applied.adjustments.push(adjustment);
                }
                Evaluation::NotApplicable => {
                    debug!(strategy = %strategy.describe(), "adjustment not applicable");
                }
            }
        }

        Ok(applied)
    }
}

/// Adjustments that applied, in registration order, and their sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppliedAdjustments {
    pub adjustments: Vec<Adjustment>,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Product, TaxRate};

    /// Fixed outcome, for order and summing checks.
    #[derive(Debug)]
    struct Fixed(&'static str, Option<i64>);

    impl AdjustmentStrategy for Fixed {
        fn describe(&self) -> String {
            self.0.to_string()
        }

        fn evaluate(&self, _: &[LineItem], _: &Catalog) -> PricingResult<Evaluation> {
            Ok(match self.1 {
                Some(cents) => Evaluation::Applied(Adjustment::new(self.0, Decimal::from(cents))),
                None => Evaluation::NotApplicable,
            })
        }
    }

    #[test]
    fn test_preserves_registration_order() {
        let registry = AdjustmentRegistry::new()
            .with(Fixed("surcharge", Some(50)))
            .with(Fixed("skipped", None))
            .with(Fixed("credit", Some(-20)));

        let applied = registry.apply_all(&[], &Catalog::new()).unwrap();
        let labels: Vec<&str> = applied
            .adjustments
            .iter()
            .map(|a| a.description.as_str())
            .collect();

        assert_eq!(labels, ["surcharge", "credit"]);
        assert_eq!(applied.total, Decimal::from(30));
    }

    #[test]
    fn test_not_applicable_does_not_change_total() {
        let registry = AdjustmentRegistry::new()
            .with(Fixed("a", None))
            .with(Fixed("b", None));

        let applied = registry.apply_all(&[], &Catalog::new()).unwrap();
        assert!(applied.adjustments.is_empty());
        assert!(applied.total.is_zero());
    }

    #[test]
    fn test_zero_amount_is_listed() {
        let registry = AdjustmentRegistry::new().with(Fixed("free shipping", Some(0)));
        let applied = registry.apply_all(&[], &Catalog::new()).unwrap();
        assert_eq!(applied.adjustments.len(), 1);
    }

    #[test]
    fn test_standard_registry_order() {
        let ontario = Jurisdiction::new(
            "ON",
            "Ontario",
            TaxRate::from_percent(Decimal::from(13)).unwrap(),
        );
        let registry = AdjustmentRegistry::standard(&ontario, DiscountAdjustment::default());

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.describe_all(),
            ["Ontario taxes at 13%:", "Discount for orders over $100"]
        );

        let catalog: Catalog = [Product::new(
            "A",
            "Jacket",
            Money::from_cents(20000),
            Money::from_cents(12000),
            true,
        )]
        .into_iter()
        .collect();
        let applied = registry
            .apply_all(&[LineItem::new("A", 1)], &catalog)
            .unwrap();

        assert_eq!(applied.adjustments[0].amount, Decimal::from(2600));
        assert_eq!(applied.adjustments[1].amount, Decimal::from(-2000));
        assert_eq!(applied.total, Decimal::from(600));
    }

    #[test]
    fn test_error_aborts_computation() {
        let ontario = Jurisdiction::new("ON", "Ontario", TaxRate::from_bps(1300));
        let registry = AdjustmentRegistry::standard(&ontario, DiscountAdjustment::default());

        let err = registry
            .apply_all(&[LineItem::new("ghost", 1)], &Catalog::new())
            .unwrap_err();
        assert_eq!(err, PricingError::UnknownProduct("ghost".to_string()));
    }
}
