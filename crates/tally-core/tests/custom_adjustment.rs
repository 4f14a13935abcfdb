//! A new kind of adjustment plugs into the registry without touching the
//! engine, the registry or the totals.

use rust_decimal::Decimal;
use tally_core::{
    Adjustment, AdjustmentRegistry, AdjustmentStrategy, CartSnapshot, Catalog, Evaluation,
    Jurisdiction, LineItem, Money, OrderTotals, PricingEngine, PricingResult, Product,
    TaxAdjustment, TaxRate,
};

/// Flat credit once the cart holds enough units.
#[derive(Debug)]
struct BulkCredit {
    min_units: u64,
    credit: Money,
}

impl AdjustmentStrategy for BulkCredit {
    fn describe(&self) -> String {
        format!("Bulk credit ({}+ items)", self.min_units)
    }

    fn evaluate(&self, items: &[LineItem], catalog: &Catalog) -> PricingResult<Evaluation> {
        // Reject unknown products like the built-in strategies do.
        PricingEngine::compute_subtotal(items, catalog)?;

        let units: u64 = items.iter().map(|item| u64::from(item.quantity)).sum();
        if units < self.min_units {
            return Ok(Evaluation::NotApplicable);
        }

        Ok(Evaluation::Applied(Adjustment::new(
            self.describe(),
            -self.credit.to_decimal(),
        )))
    }
}

/// Percentage surcharge on non-taxable goods only.
#[derive(Debug)]
struct ExemptHandlingFee {
    percent: Decimal,
}

impl AdjustmentStrategy for ExemptHandlingFee {
    fn describe(&self) -> String {
        "Handling fee".to_string()
    }

    fn evaluate(&self, items: &[LineItem], catalog: &Catalog) -> PricingResult<Evaluation> {
        let subtotal = PricingEngine::compute_subtotal(items, catalog)?;
        let taxable = PricingEngine::compute_taxable_subtotal(items, catalog)?;
        let exempt = subtotal - taxable;

        if exempt.is_zero() {
            return Ok(Evaluation::NotApplicable);
        }

        Ok(Evaluation::Applied(Adjustment::new(
            self.describe(),
            exempt.percentage(self.percent)?,
        )))
    }
}

fn catalog() -> Catalog {
    [
        Product::new("pen", "Gel pen", Money::from_cents(150), Money::from_cents(40), true),
        Product::new("book", "Notebook", Money::from_cents(850), Money::from_cents(300), false),
    ]
    .into_iter()
    .collect()
}

#[test]
fn custom_strategy_applies_in_registration_order() {
    let ontario = Jurisdiction::new("ON", "Ontario", TaxRate::from_bps(1300));
    let registry = AdjustmentRegistry::new()
        .with(TaxAdjustment::new(&ontario))
        .with(BulkCredit {
            min_units: 5,
            credit: Money::from_cents(100),
        });

    let cart = CartSnapshot::from_lines([LineItem::new("pen", 4), LineItem::new("book", 1)]);
    let totals = OrderTotals::compute(&cart, &catalog(), &registry).unwrap();

    // 4 × 150 + 850
    assert_eq!(totals.subtotal, Money::from_cents(1450));
    let lines: Vec<(&str, Decimal)> = totals
        .adjustments
        .iter()
        .map(|a| (a.description.as_str(), a.amount))
        .collect();
    assert_eq!(
        lines,
        [
            ("Ontario taxes at 13%:", Decimal::from(78)),
            ("Bulk credit (5+ items)", Decimal::from(-100)),
        ]
    );
    assert_eq!(totals.total, Decimal::from(1428));
}

#[test]
fn custom_strategy_can_decline() {
    let registry = AdjustmentRegistry::new().with(BulkCredit {
        min_units: 10,
        credit: Money::from_cents(500),
    });

    let cart = CartSnapshot::from_lines([LineItem::new("pen", 2)]);
    let totals = OrderTotals::compute(&cart, &catalog(), &registry).unwrap();

    assert!(totals.adjustments.is_empty());
    assert_eq!(totals.total, Decimal::from(300));
}

#[test]
fn custom_percentage_keeps_exact_amounts() {
    let registry = AdjustmentRegistry::new().with(ExemptHandlingFee {
        percent: Decimal::new(25, 1),
    });

    let cart = CartSnapshot::from_lines([LineItem::new("book", 1), LineItem::new("pen", 1)]);
    let totals = OrderTotals::compute(&cart, &catalog(), &registry).unwrap();

    // 850 × 2.5% = 21.25 cents, rounded only for display
    assert_eq!(totals.adjustments[0].amount, Decimal::new(2125, 2));
    assert_eq!(totals.adjustments[0].rounded_amount().unwrap(), 21);
    assert_eq!(totals.total, Decimal::new(102125, 2));
    assert_eq!(totals.formatted().total, "10.21");

    let handoff = totals.checkout_handoff(cart.items(), &catalog()).unwrap();
    assert_eq!(
        handoff.form_fields().last().map(|(_, value)| value.as_str()),
        Some("Handling fee|0.21")
    );
}

#[test]
fn custom_strategy_errors_abort_the_computation() {
    let registry = AdjustmentRegistry::new().with(BulkCredit {
        min_units: 1,
        credit: Money::from_cents(100),
    });

    let cart = CartSnapshot::from_lines([LineItem::new("eraser", 1)]);
    assert!(OrderTotals::compute(&cart, &catalog(), &registry).is_err());
}
