//! End-to-end pricing scenarios: snapshots in, totals and handoff out.

use std::thread;

use rust_decimal::Decimal;
use tally_core::{
    AdjustmentRegistry, CartSnapshot, Catalog, DiscountAdjustment, Jurisdiction,
    JurisdictionTable, LineItem, Money, OrderTotals, PricingEngine, PricingError, Product,
    TaxAdjustment, TaxRate,
};

fn provinces() -> JurisdictionTable {
    [
        ("AB", "Alberta", Decimal::from(5)),
        ("ON", "Ontario", Decimal::from(13)),
        ("QC", "Quebec", Decimal::new(14975, 3)),
        ("XX", "Tax Free Zone", Decimal::ZERO),
    ]
    .into_iter()
    .map(|(code, name, percent)| {
        Jurisdiction::new(code, name, TaxRate::from_percent(percent).unwrap())
    })
    .collect()
}

fn gift_shop() -> Catalog {
    [
        Product::new("A", "Tote bag", Money::from_cents(500), Money::from_cents(200), true),
        Product::new("B", "Sticker", Money::from_cents(200), Money::from_cents(50), false),
        Product::new(
            "C",
            "Laptop sleeve",
            Money::from_cents(10001),
            Money::from_cents(6000),
            false,
        ),
        Product::new("D", "Hoodie", Money::from_cents(4500), Money::from_cents(2500), true),
    ]
    .into_iter()
    .collect()
}

fn standard_registry(code: &str) -> AdjustmentRegistry {
    let table = provinces();
    let jurisdiction = table.select(Some(code)).unwrap();
    AdjustmentRegistry::standard(jurisdiction, DiscountAdjustment::default())
}

#[test]
fn mixed_cart_in_ontario() {
    let cart = CartSnapshot::from_lines([LineItem::new("A", 2), LineItem::new("B", 1)]);
    let catalog = gift_shop();

    let taxable = PricingEngine::compute_taxable_subtotal(cart.items(), &catalog).unwrap();
    let totals = OrderTotals::compute(&cart, &catalog, &standard_registry("ON")).unwrap();

    assert_eq!(totals.subtotal, Money::from_cents(1200));
    assert_eq!(taxable, Money::from_cents(1000));
    assert_eq!(totals.adjustments.len(), 1);
    assert_eq!(totals.adjustments[0].description, "Ontario taxes at 13%:");
    assert_eq!(totals.adjustments[0].amount, Decimal::from(130));
    assert_eq!(totals.total, Decimal::from(1330));
}

#[test]
fn discount_boundary_one_cent_over() {
    let cart = CartSnapshot::from_lines([LineItem::new("C", 1)]);
    let totals = OrderTotals::compute(&cart, &gift_shop(), &standard_registry("XX")).unwrap();

    assert_eq!(totals.subtotal, Money::from_cents(10001));
    assert_eq!(totals.adjustments.len(), 1, "no taxable lines, so no tax line");
    assert_eq!(totals.adjustments[0].description, "Discount for orders over $100");
    assert_eq!(totals.adjustments[0].amount, Decimal::new(-10001, 1));
    assert_eq!(totals.adjustments[0].rounded_amount().unwrap(), -1000);
    assert_eq!(totals.total, Decimal::new(90009, 1));
    assert_eq!(totals.rounded_total().unwrap(), 9001);

    let formatted = totals.formatted();
    assert_eq!(formatted.adjustments[0].amount, "-10.00");
    assert_eq!(formatted.total, "90.01");
}

#[test]
fn discount_boundary_exactly_one_hundred() {
    // 2 × $45.00 + $10.00 = $100.00 exactly
    let cart = CartSnapshot::from_lines([LineItem::new("D", 2), LineItem::new("A", 2)]);
    let totals = OrderTotals::compute(&cart, &gift_shop(), &standard_registry("AB")).unwrap();

    assert_eq!(totals.subtotal, Money::from_cents(10000));
    let labels: Vec<&str> = totals
        .adjustments
        .iter()
        .map(|a| a.description.as_str())
        .collect();
    assert_eq!(labels, ["Alberta taxes at 5%:"]);
    assert_eq!(totals.total, Decimal::from(10500));
}

#[test]
fn tax_and_discount_together() {
    // Hoodie ×3 = 13500 taxable; sticker ×1 = 200 exempt
    let cart = CartSnapshot::from_lines([LineItem::new("D", 3), LineItem::new("B", 1)]);
    let catalog = gift_shop();
    let totals = OrderTotals::compute(&cart, &catalog, &standard_registry("QC")).unwrap();

    assert_eq!(totals.subtotal, Money::from_cents(13700));
    // 13500 × 14.975% = 2021.625
    assert_eq!(totals.adjustments[0].amount, Decimal::new(2021625, 3));
    // -10% of 13700
    assert_eq!(totals.adjustments[1].amount, Decimal::from(-1370));
    assert_eq!(
        totals.total,
        totals.subtotal.to_decimal() + totals.adjustments_total()
    );
    assert_eq!(totals.formatted().total, "143.52");

    let handoff = totals.checkout_handoff(cart.items(), &catalog).unwrap();
    let encoded: Vec<String> = handoff.lines.iter().map(|l| l.encode()).collect();
    assert_eq!(
        encoded,
        [
            "Hoodie|45.00",
            "Sticker|2.00",
            "Quebec taxes at 14.975%:|20.22",
            "Discount for orders over $100|-13.70",
        ]
    );
}

#[test]
fn empty_cart_has_nothing_to_price() {
    let cart = CartSnapshot::from_lines([LineItem::new("A", 0)]);
    let totals = OrderTotals::compute(&cart, &gift_shop(), &standard_registry("ON")).unwrap();

    assert!(cart.is_empty());
    assert_eq!(totals.subtotal, Money::zero());
    assert!(totals.adjustments.is_empty());
    assert!(totals.total.is_zero());
    assert!(totals
        .checkout_handoff(cart.items(), &gift_shop())
        .unwrap()
        .is_empty());
}

#[test]
fn total_matches_any_strategy_combination() {
    let cart = CartSnapshot::from_lines([
        LineItem::new("A", 4),
        LineItem::new("C", 1),
        LineItem::new("D", 1),
    ]);
    let catalog = gift_shop();
    let ontario = provinces().select(Some("ON")).unwrap().clone();

    let registries = [
        AdjustmentRegistry::new(),
        AdjustmentRegistry::new().with(TaxAdjustment::new(&ontario)),
        AdjustmentRegistry::new().with(DiscountAdjustment::default()),
        AdjustmentRegistry::new()
            .with(DiscountAdjustment::default())
            .with(TaxAdjustment::new(&ontario)),
    ];

    for registry in &registries {
        let totals = OrderTotals::compute(&cart, &catalog, registry).unwrap();
        assert_eq!(
            totals.total,
            totals.subtotal.to_decimal() + totals.adjustments_total(),
            "registry {:?}",
            registry.describe_all()
        );
    }
}

#[test]
fn unknown_product_fails_the_whole_computation() {
    let cart = CartSnapshot::from_lines([LineItem::new("A", 1), LineItem::new("retired", 1)]);
    let err = OrderTotals::compute(&cart, &gift_shop(), &standard_registry("ON")).unwrap_err();
    assert_eq!(err, PricingError::UnknownProduct("retired".to_string()));
}

#[test]
fn unknown_jurisdiction_is_reported() {
    let err = provinces().select(Some("YT")).unwrap_err();
    assert_eq!(err, PricingError::JurisdictionNotFound("YT".to_string()));
}

#[test]
fn concurrent_computations_agree() {
    let catalog = gift_shop();
    let registry = standard_registry("QC");
    let cart = CartSnapshot::from_lines([LineItem::new("D", 3), LineItem::new("C", 2)]);
    let expected = OrderTotals::compute(&cart, &catalog, &registry).unwrap();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| OrderTotals::compute(&cart, &catalog, &registry)))
            .collect();

        for handle in handles {
            let totals = handle.join().unwrap().unwrap();
            assert_eq!(totals, expected);
        }
    });
}
