//! # Validation Module
//!
//! Rules for snapshot rows arriving from external providers.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Snapshot provider (files, database)                          │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: row rules, converting raw values into core types     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Pricing engine                                               │
//! │  ├── UnknownProduct / JurisdictionNotFound                             │
//! │  └── Checked arithmetic (AmountOverflow)                               │
//! │                                                                         │
//! │  Rows that fail here never reach a pricing computation                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_product_id, validate_quantity};
//!
//! validate_product_id("42").unwrap();
//! assert_eq!(validate_quantity(3).unwrap(), 3u32);
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog product identifier.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    validate_text("product id", id, 64)
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Conference T-shirt").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, 200)
}

/// Validates a jurisdiction display name.
pub fn validate_jurisdiction_name(name: &str) -> ValidationResult<()> {
    validate_text("jurisdiction name", name, 100)
}

/// Validates a jurisdiction code.
///
/// ## Rules
/// - 1 to 8 characters
/// - Uppercase ASCII letters and digits only (`ON`, `QC`, `US-NY` is rejected)
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_jurisdiction_code;
///
/// assert!(validate_jurisdiction_code("ON").is_ok());
/// assert!(validate_jurisdiction_code("on").is_err());
/// ```
pub fn validate_jurisdiction_code(code: &str) -> ValidationResult<()> {
    validate_text("jurisdiction code", code, 8)?;

    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(ValidationError::InvalidFormat {
            field: "jurisdiction code".to_string(),
            reason: "must contain only uppercase letters and digits".to_string(),
        });
    }

    Ok(())
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart quantity and narrows it to `u32`.
///
/// ## Rules
/// - Must not be negative
/// - Zero is allowed; the cart snapshot drops such lines
/// - Must fit in a `u32`
pub fn validate_quantity(qty: i64) -> ValidationResult<u32> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    u32::try_from(qty).map_err(|_| ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

/// Validates an amount in cents (price or cost).
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, donated stock)
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_cents;
///
/// assert!(validate_cents("price", 1099).is_ok());
/// assert!(validate_cents("price", 0).is_ok());
/// assert!(validate_cents("price", -100).is_err());
/// ```
pub fn validate_cents(field: &str, cents: i64) -> ValidationResult<Money> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(Money::from_cents(cents))
}

/// Validates a tax rate percentage.
///
/// ## Rules
/// - Must be between 0 and 100
pub fn validate_tax_rate_percent(percent: Decimal) -> ValidationResult<TaxRate> {
    if percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 100,
        });
    }

    TaxRate::from_percent(percent)
}

// =============================================================================
// Unit Tests
// =============================================================================
