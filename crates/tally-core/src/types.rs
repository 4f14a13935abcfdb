//! # Domain Types
//!
//! Core domain types consumed by the pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │  Jurisdiction   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product_id     │   │  code ("ON")    │       │
//! │  │  name           │   │  quantity (u32) │   │  display_name   │       │
//! │  │  unit_price     │   └─────────────────┘   │  tax_rate       │       │
//! │  │  unit_cost      │                         └─────────────────┘       │
//! │  │  taxable        │   ┌─────────────────┐                             │
//! │  └─────────────────┘   │    TaxRate      │                             │
//! │                        │  percent        │                             │
//! │                        │  13, 14.975     │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All of these are read-only inputs. The engine never mutates them and
//! never keeps them past a single computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate expressed as an exact, non-negative percentage.
///
/// ## Why Not Basis Points?
/// Combined provincial rates such as Quebec's 14.975% are finer than one
/// basis point, so the percent is kept as an exact decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    ///
    /// Negative percentages are rejected.
    pub fn from_percent(percent: Decimal) -> Result<Self, ValidationError> {
        if percent.is_sign_negative() && !percent.is_zero() {
            return Err(ValidationError::MustBeNonNegative {
                field: "tax_rate".to_string(),
            });
        }
        Ok(TaxRate(percent))
    }

    /// Creates a tax rate from basis points (825 = 8.25%).
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 2))
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Shows the percent without trailing zeros: `13`, `14.975`, `0`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = ValidationError;

    fn try_from(percent: Decimal) -> Result<Self, Self::Error> {
        TaxRate::from_percent(percent)
    }
}

impl From<TaxRate> for Decimal {
    fn from(rate: TaxRate) -> Self {
        rate.0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product, as seen at computation time.
///
/// The price is always read from the current catalog; nothing about a
/// product is frozen into the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: String,

    /// Display name shown on the receipt and in the checkout handoff.
    pub name: String,

    /// Price in cents.
    pub unit_price: Money,

    /// Cost in cents (for margin display).
    pub unit_cost: Money,

    /// Whether the product is subject to jurisdiction tax.
    pub taxable: bool,
}

impl Product {
    /// Creates a product.
    ///
    /// Prices and costs are expected to be non-negative cents; the snapshot
    /// loader rejects negative values before a product is built.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        unit_cost: Money,
        taxable: bool,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            unit_price,
            unit_cost,
            taxable,
        }
    }

    /// Returns what the seller keeps per unit (price - cost).
    ///
    /// Negative when the product sells below cost.
    pub fn margin(&self) -> PricingResult<Money> {
        self.unit_price
            .checked_sub(self.unit_cost)
            .ok_or(PricingError::AmountOverflow { context: "margin" })
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One cart line: a product reference and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub product_id: String,
    pub quantity: u32,
}

impl LineItem {
    /// Creates a cart line.
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        LineItem {
            product_id: product_id.into(),
            quantity,
        }
    }
}

// =============================================================================
// Jurisdiction
// =============================================================================

/// A tax region a purchase can be priced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Jurisdiction {
    /// Short code, e.g. `ON`.
    pub code: String,

    /// Human readable name, e.g. `Ontario`.
    pub display_name: String,

    /// Sales tax applied to taxable goods.
    #[ts(as = "String")]
    pub tax_rate: TaxRate,
}

impl Jurisdiction {
    /// Creates a jurisdiction.
    pub fn new(
        code: impl Into<String>,
        display_name: impl Into<String>,
        tax_rate: TaxRate,
    ) -> Self {
        Jurisdiction {
            code: code.into(),
            display_name: display_name.into(),
            tax_rate,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
