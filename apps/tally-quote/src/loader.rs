//! Snapshot loading.
//!
//! Reads the three JSON snapshot files from the data directory and converts
//! their rows into tally-core types. Row shapes follow the storefront tables:
//!
//! ```text
//! catalog.json        [{ "id": "1", "name": "Mug", "price": 1250, "cost": 400, "taxes": true }]
//! jurisdictions.json  [{ "code": "ON", "name": "Ontario", "taxrate": "13" }]
//! cart.json           [{ "product": "1", "quantity": 2 }]
//! ```
//!
//! Ids may be JSON strings or integers; `taxes` may be a boolean or 0/1.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tally_core::validation::{
    validate_cents, validate_jurisdiction_code, validate_jurisdiction_name, validate_product_id,
    validate_product_name, validate_quantity, validate_tax_rate_percent,
};
use tally_core::{
    CartSnapshot, Catalog, Jurisdiction, JurisdictionTable, LineItem, Product, ValidationError,
};
use tracing::{debug, info};

pub const CATALOG_FILE: &str = "catalog.json";
pub const JURISDICTIONS_FILE: &str = "jurisdictions.json";
pub const CART_FILE: &str = "cart.json";

// =============================================================================
// Errors
// =============================================================================

/// Snapshot loading errors.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid row {row} in {path}: {source}")]
    Validation {
        path: PathBuf,
        row: usize,
        source: ValidationError,
    },
}

// =============================================================================
// Row Records
// =============================================================================

/// Identifier column that may be stored as text or as an integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Text(String),
    Number(i64),
}

impl RowId {
    fn into_string(self) -> String {
        match self {
            RowId::Text(s) => s.trim().to_string(),
            RowId::Number(n) => n.to_string(),
        }
    }
}

/// Boolean column that may be stored as `true`/`false` or `1`/`0`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(n) => n != 0,
        }
    }
}

/// One row of `catalog.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: RowId,
    pub name: String,
    pub price: i64,
    pub cost: i64,
    pub taxes: Flag,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ValidationError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = record.id.into_string();
        validate_product_id(&id)?;
        validate_product_name(&record.name)?;

        Ok(Product::new(
            id,
            record.name.trim(),
            validate_cents("price", record.price)?,
            validate_cents("cost", record.cost)?,
            record.taxes.is_set(),
        ))
    }
}

/// One row of `jurisdictions.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionRecord {
    pub code: String,
    pub name: String,
    pub taxrate: Decimal,
}

impl TryFrom<JurisdictionRecord> for Jurisdiction {
    type Error = ValidationError;

    fn try_from(record: JurisdictionRecord) -> Result<Self, Self::Error> {
        let code = record.code.trim();
        validate_jurisdiction_code(code)?;
        validate_jurisdiction_name(&record.name)?;
        let rate = validate_tax_rate_percent(record.taxrate)?;

        Ok(Jurisdiction::new(code, record.name.trim(), rate))
    }
}

/// One row of `cart.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CartItemRecord {
    pub product: RowId,
    pub quantity: i64,
}

impl TryFrom<CartItemRecord> for LineItem {
    type Error = ValidationError;

    fn try_from(record: CartItemRecord) -> Result<Self, Self::Error> {
        let product_id = record.product.into_string();
        validate_product_id(&product_id)?;

        Ok(LineItem::new(product_id, validate_quantity(record.quantity)?))
    }
}

// =============================================================================
// Snapshots
// =============================================================================

/// Everything one quote is computed from.
#[derive(Debug, Clone)]
pub struct Snapshots {
    pub catalog: Catalog,
    pub jurisdictions: JurisdictionTable,
    pub cart: CartSnapshot,
}

impl Snapshots {
    /// Loads all three snapshot files from `dir`.
    pub fn load(dir: &Path) -> Result<Self, LoadError> {
        let catalog: Catalog = convert_rows::<ProductRecord, Product>(&dir.join(CATALOG_FILE))?
            .into_iter()
            .collect();
        let jurisdictions: JurisdictionTable =
            convert_rows::<JurisdictionRecord, Jurisdiction>(&dir.join(JURISDICTIONS_FILE))?
                .into_iter()
                .collect();
        let cart = CartSnapshot::from_lines(convert_rows::<CartItemRecord, LineItem>(
            &dir.join(CART_FILE),
        )?);

        info!(
            dir = %dir.display(),
            products = catalog.len(),
            jurisdictions = jurisdictions.len(),
            cart_lines = cart.len(),
            "Snapshots loaded"
        );

        Ok(Snapshots {
            catalog,
            jurisdictions,
            cart,
        })
    }
}

/// Reads `path` as a JSON array of `R` and validates each row into `T`.
fn convert_rows<R, T>(path: &Path) -> Result<Vec<T>, LoadError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = ValidationError>,
{
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rows(path, &text)
}

fn parse_rows<R, T>(path: &Path, text: &str) -> Result<Vec<T>, LoadError>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = ValidationError>,
{
    let records: Vec<R> = serde_json::from_str(text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows = records.len(), "Parsed snapshot rows");

    records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            T::try_from(record).map_err(|source| LoadError::Validation {
                path: path.to_path_buf(),
                row,
                source,
            })
        })
        .collect()
}
