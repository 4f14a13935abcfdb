//! # Tally Quote
//!
//! Prices a cart snapshot and prints a receipt or a JSON quote report.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tally-quote [CODE]                             │
//! │                                                                         │
//! │  env TALLY_* ──► QuoteConfig ──► Snapshots::load(data_dir)              │
//! │                                        │                                │
//! │            argv[1] / TALLY_JURISDICTION ──► JurisdictionTable::select   │
//! │                                        │                                │
//! │                    AdjustmentRegistry::standard(tax, discount)          │
//! │                                        │                                │
//! │                          QuoteReport ──► stdout (text | json)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so JSON output on stdout stays machine readable.

mod config;
mod loader;
mod report;

use std::env;
use std::process;

use anyhow::Context;
use tally_core::AdjustmentRegistry;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{OutputFormat, QuoteConfig};
use crate::loader::Snapshots;
use crate::report::QuoteReport;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        error!(error = %format!("{e:#}"), "Quote failed");
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = QuoteConfig::load()
        .context("Failed to load configuration")?
        .with_jurisdiction_override(env::args().nth(1));
    info!(
        data_dir = %config.data_dir.display(),
        jurisdiction = ?config.jurisdiction,
        output = ?config.output,
        "Configuration loaded"
    );

    let snapshots = Snapshots::load(&config.data_dir)?;

    let jurisdiction = snapshots
        .jurisdictions
        .select(config.jurisdiction.as_deref())?
        .clone();
    let registry = AdjustmentRegistry::standard(&jurisdiction, config.discount()?);

    let report = QuoteReport::build(&snapshots, &jurisdiction, &registry)
        .context("Failed to price cart")?;
    info!(
        jurisdiction = %jurisdiction.code,
        subtotal = %report.formatted.subtotal,
        adjustments = report.totals.adjustments.len(),
        total = %report.formatted.total,
        "Quote computed"
    );

    match config.output {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show applied / skipped adjustments
/// - `RUST_LOG=tally_core=trace` - Also show dropped cart lines
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
