//! # tally-core: Pure Pricing Logic for Tally
//!
//! This crate turns a cart, a catalog and a tax jurisdiction into a subtotal,
//! an ordered list of named adjustments and a grand total. It contains no
//! I/O: every input arrives as an immutable snapshot.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Snapshot providers (files, database, web session)        │   │
//! │  │     cart lines ──── catalog rows ──── jurisdiction rows         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌─────────────┐  ┌──────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │ adjustments │  │ registry │  │  totals   │  │   │
//! │  │   │ subtotal  │  │ Tax         │  │ ordered  │  │ total     │  │   │
//! │  │   │ taxable   │  │ Discount    │  │ apply    │  │ handoff   │  │   │
//! │  │   └───────────┘  └─────────────┘  └──────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • EXACT AMOUNTS UNTIL FORMATTING     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             Checkout collaborator (item0..itemN lines)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, Jurisdiction, TaxRate)
//! - [`money`] - Integer cents and exact percentages
//! - [`snapshot`] - Catalog, CartSnapshot, JurisdictionTable
//! - [`pricing`] - Subtotal and taxable subtotal
//! - [`adjustments`] - The strategy trait and its Tax / Discount variants
//! - [`registry`] - Ordered strategy application
//! - [`totals`] - Order totals and the checkout handoff
//! - [`format`] - Rounding and display, at the boundary only
//! - [`validation`] - Rules for incoming snapshot rows
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tally_core::{
//!     AdjustmentRegistry, CartSnapshot, Catalog, DiscountAdjustment, Jurisdiction,
//!     JurisdictionTable, LineItem, Money, OrderTotals, Product, TaxRate,
//! };
//!
//! let catalog: Catalog = [
//!     Product::new("A", "Tote bag", Money::from_cents(500), Money::from_cents(200), true),
//!     Product::new("B", "Sticker", Money::from_cents(200), Money::from_cents(50), false),
//! ]
//! .into_iter()
//! .collect();
//! let provinces: JurisdictionTable =
//!     [Jurisdiction::new("ON", "Ontario", TaxRate::from_bps(1300))].into_iter().collect();
//! let cart = CartSnapshot::from_lines([LineItem::new("A", 2), LineItem::new("B", 1)]);
//!
//! let ontario = provinces.select(None)?;
//! let registry = AdjustmentRegistry::standard(ontario, DiscountAdjustment::default());
//! let totals = OrderTotals::compute(&cart, &catalog, &registry)?;
//!
//! assert_eq!(totals.subtotal, Money::from_cents(1200));
//! assert_eq!(totals.total, Decimal::from(1330));
//! assert_eq!(totals.formatted().total, "13.30");
//! # Ok::<(), tally_core::PricingError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adjustments;
pub mod error;
pub mod format;
pub mod money;
pub mod pricing;
pub mod registry;
pub mod snapshot;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use adjustments::{
    Adjustment, AdjustmentStrategy, DiscountAdjustment, Evaluation, TaxAdjustment,
};
pub use error::{PricingError, PricingResult, ValidationError};
pub use money::Money;
pub use pricing::{LineTotal, PricingEngine};
pub use registry::{AdjustmentRegistry, AppliedAdjustments};
pub use snapshot::{CartSnapshot, Catalog, CatalogEntry, JurisdictionOption, JurisdictionTable};
pub use totals::{CheckoutHandoff, CheckoutLine, FormattedTotals, OrderTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Jurisdiction used when the caller does not pick one.
pub const DEFAULT_JURISDICTION_CODE: &str = "ON";

/// Subtotal an order must exceed (strictly) to earn the default discount.
pub const DEFAULT_DISCOUNT_THRESHOLD: Money = Money::from_cents(10_000);

/// Default discount, in percent of the subtotal.
pub const DEFAULT_DISCOUNT_PERCENT: u32 = 10;
