//! # Snapshots
//!
//! Read-only views of the external data the engine prices against.
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐   ┌────────────────────────┐
//! │  CartSnapshot    │   │  Catalog         │   │  JurisdictionTable     │
//! │  ordered lines   │   │  id → Product    │   │  code → Jurisdiction   │
//! │  (qty 0 dropped) │   │  insertion order │   │  select(code or "ON")  │
//! └────────┬─────────┘   └────────┬─────────┘   └───────────┬────────────┘
//!          └──────────────────────┼─────────────────────────┘
//!                                 ▼
//!                          PricingEngine / AdjustmentRegistry
//! ```
//!
//! Snapshot providers (database, files, another service) build these once per
//! request. The engine only borrows them.

use std::collections::HashMap;

use serde::Serialize;
use tracing::trace;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::format::format_money;
use crate::types::{Jurisdiction, LineItem, Product};
use crate::DEFAULT_JURISDICTION_CODE;

// =============================================================================
// Catalog
// =============================================================================

/// Products keyed by id, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product. A product with an id already present replaces the
    /// earlier entry in place.
    pub fn insert(&mut self, product: Product) {
        match self.index.get(&product.id) {
            Some(&position) => {
                if let Some(slot) = self.products.get_mut(position) {
                    *slot = product;
                }
            }
            None => {
                self.index.insert(product.id.clone(), self.products.len());
                self.products.push(product);
            }
        }
    }

    /// Looks a product up by id.
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.index
            .get(product_id)
            .and_then(|&position| self.products.get(position))
    }

    /// Looks a product up by id, failing with `UnknownProduct`.
    pub fn require(&self, product_id: &str) -> PricingResult<&Product> {
        self.get(product_id)
            .ok_or_else(|| PricingError::UnknownProduct(product_id.to_string()))
    }

    /// Iterates products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product table rows: name, price and what the seller keeps.
    pub fn listing(&self) -> PricingResult<Vec<CatalogEntry>> {
        self.products
            .iter()
            .map(|product| {
                Ok(CatalogEntry {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    price: format_money(product.unit_price),
                    margin: format_money(product.margin()?),
                })
            })
            .collect()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}

/// One formatted row of the product table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    pub product_id: String,
    pub name: String,
    /// What the customer pays.
    pub price: String,
    /// What the seller keeps (price - cost).
    pub margin: String,
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// The ordered lines of a cart at computation time.
///
/// ## Invariants
/// - Every line has quantity ≥ 1
/// - Line order is the cart's order and is kept in every output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    items: Vec<LineItem>,
}

impl CartSnapshot {
    /// Builds a snapshot, dropping zero-quantity lines.
    pub fn from_lines(lines: impl IntoIterator<Item = LineItem>) -> Self {
        let items = lines
            .into_iter()
            .filter(|line| {
                if line.quantity == 0 {
                    trace!(product_id = %line.product_id, "dropping zero-quantity cart line");
                    return false;
                }
                true
            })
            .collect();
        CartSnapshot { items }
    }

    /// Returns the cart lines in cart order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

// =============================================================================
// Jurisdiction Table
// =============================================================================

/// Jurisdictions keyed by code.
#[derive(Debug, Clone, Default)]
pub struct JurisdictionTable {
    jurisdictions: Vec<Jurisdiction>,
    index: HashMap<String, usize>,
}

impl JurisdictionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a jurisdiction; a repeated code replaces the earlier row.
    pub fn insert(&mut self, jurisdiction: Jurisdiction) {
        match self.index.get(&jurisdiction.code) {
            Some(&position) => {
                if let Some(slot) = self.jurisdictions.get_mut(position) {
                    *slot = jurisdiction;
                }
            }
            None => {
                self.index
                    .insert(jurisdiction.code.clone(), self.jurisdictions.len());
                self.jurisdictions.push(jurisdiction);
            }
        }
    }

    /// Looks a jurisdiction up by code.
    pub fn get(&self, code: &str) -> Option<&Jurisdiction> {
        self.index
            .get(code)
            .and_then(|&position| self.jurisdictions.get(position))
    }

    /// Resolves the caller's selection.
    ///
    /// ## Behavior
    /// - `None` selects [`DEFAULT_JURISDICTION_CODE`]
    /// - A code missing from the table fails with `JurisdictionNotFound`;
    ///   there is no silent fallback to the default
    pub fn select(&self, code: Option<&str>) -> PricingResult<&Jurisdiction> {
        let code = code.unwrap_or(DEFAULT_JURISDICTION_CODE);
        self.get(code)
            .ok_or_else(|| PricingError::JurisdictionNotFound(code.to_string()))
    }

    /// Selector entries sorted by display name, flagging the selected code.
    pub fn options(&self, selected_code: &str) -> Vec<JurisdictionOption> {
        let mut sorted: Vec<&Jurisdiction> = self.jurisdictions.iter().collect();
        sorted.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        sorted
            .into_iter()
            .map(|jurisdiction| JurisdictionOption {
                code: jurisdiction.code.clone(),
                display_name: jurisdiction.display_name.clone(),
                selected: jurisdiction.code == selected_code,
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Jurisdiction> {
        self.jurisdictions.iter()
    }

    pub fn len(&self) -> usize {
        self.jurisdictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jurisdictions.is_empty()
    }
}

impl FromIterator<Jurisdiction> for JurisdictionTable {
    fn from_iter<I: IntoIterator<Item = Jurisdiction>>(iter: I) -> Self {
        let mut table = JurisdictionTable::new();
        for jurisdiction in iter {
            table.insert(jurisdiction);
        }
        table
    }
}

/// One entry of the jurisdiction selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct JurisdictionOption {
    pub code: String,
    pub display_name: String,
    pub selected: bool,
}
