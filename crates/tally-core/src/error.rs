//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── PricingError     - Failures of a pricing computation              │
//! │  └── ValidationError  - Snapshot rows that break input rules           │
//! │                                                                         │
//! │  tally-quote errors (binary)                                           │
//! │  ├── ConfigError      - Bad environment values                         │
//! │  └── LoadError        - Snapshot files that cannot be read             │
//! │                                                                         │
//! │  Flow: ValidationError → LoadError | PricingError → anyhow → exit      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, jurisdiction code)
//! 3. Errors are enum variants, never String
//! 4. A failed computation never produces a partial or zero-substituted total

use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors raised while pricing an order.
///
/// Every variant is fatal to the computation that raised it. The engine
/// never falls back to a zero price or a default jurisdiction on its own.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line item references a product that is absent from the catalog.
    ///
    /// ## When This Occurs
    /// - The product row was deleted after it was added to the cart
    /// - The cart snapshot and catalog snapshot were taken from different stores
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: [{product: "42", quantity: 1}]
    ///      │
    ///      ▼
    /// catalog.require("42") → None
    ///      │
    ///      ▼
    /// UnknownProduct("42")   (never priced as $0.00)
    /// ```
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The selected jurisdiction code is absent from the jurisdiction table.
    #[error("Jurisdiction not found: {0}")]
    JurisdictionNotFound(String),

    /// Checked arithmetic overflowed while computing an amount.
    #[error("Amount overflow while computing {context}")]
    AmountOverflow { context: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when an external snapshot row (product, jurisdiction, cart line)
/// does not meet the engine's input rules. Used at the loading boundary,
/// before any computation runs.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g. malformed jurisdiction code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
