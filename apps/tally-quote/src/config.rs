//! Quote configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use tally_core::{DiscountAdjustment, Money, DEFAULT_DISCOUNT_PERCENT, DEFAULT_DISCOUNT_THRESHOLD};

/// Quote binary configuration.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Directory holding catalog.json, jurisdictions.json and cart.json
    pub data_dir: PathBuf,

    /// Selected jurisdiction code; `None` means the default province
    pub jurisdiction: Option<String>,

    /// Subtotal the order must exceed to earn the discount, in cents
    pub discount_threshold_cents: i64,

    /// Discount percent of the subtotal
    pub discount_percent: Decimal,

    /// Receipt text or JSON quote report
    pub output: OutputFormat,
}

impl QuoteConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = QuoteConfig {
            data_dir: lookup("TALLY_DATA_DIR")
                .unwrap_or_else(|| "data".to_string())
                .into(),

            jurisdiction: lookup("TALLY_JURISDICTION")
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty()),

            discount_threshold_cents: lookup("TALLY_DISCOUNT_THRESHOLD_CENTS")
                .unwrap_or_else(|| DEFAULT_DISCOUNT_THRESHOLD.cents().to_string())
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("TALLY_DISCOUNT_THRESHOLD_CENTS".to_string())
                })?,

            discount_percent: lookup("TALLY_DISCOUNT_PERCENT")
                .unwrap_or_else(|| DEFAULT_DISCOUNT_PERCENT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TALLY_DISCOUNT_PERCENT".to_string()))?,

            output: lookup("TALLY_OUTPUT")
                .unwrap_or_else(|| "text".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TALLY_OUTPUT".to_string()))?,
        };

        // Reject out-of-range discount settings at load
        config.discount()?;

        Ok(config)
    }

    /// Positional CLI argument wins over `TALLY_JURISDICTION`.
    pub fn with_jurisdiction_override(mut self, code: Option<String>) -> Self {
        if let Some(code) = code.filter(|c| !c.trim().is_empty()) {
            self.jurisdiction = Some(code.trim().to_string());
        }
        self
    }

    /// The discount strategy described by this configuration.
    pub fn discount(&self) -> Result<DiscountAdjustment, ConfigError> {
        DiscountAdjustment::new(
            Money::from_cents(self.discount_threshold_cents),
            self.discount_percent,
        )
        .map_err(|e| ConfigError::OutOfRange(e.to_string()))
    }
}

/// How the quote is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue("TALLY_OUTPUT".to_string())),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Discount configuration out of range: {0}")]
    OutOfRange(String),
}
