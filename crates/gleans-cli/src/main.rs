//! CLI for the vendor invoice glean derivation engine.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod io;

/// Derive anomaly/insight gleans from vendor invoice and line item tables.
#[derive(Parser)]
#[command(name = "gleans-data")]
#[command(about = "Vendor invoice glean derivation engine")]
#[command(version)]
struct Cli {
    /// Path to the invoices CSV.
    invoices: PathBuf,

    /// Path to the line items CSV.
    line_items: PathBuf,

    /// Path to write the glean output CSV.
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let invoices = io::read_invoices(&cli.invoices)
        .with_context(|| format!("reading invoices from {}", cli.invoices.display()))?;
    let line_items = io::read_line_items(&cli.line_items)
        .with_context(|| format!("reading line items from {}", cli.line_items.display()))?;

    let gleans = gleans_core::run_engine(&invoices, &line_items).context("deriving gleans")?;

    io::write_gleans(&cli.output, &gleans)
        .with_context(|| format!("writing gleans to {}", cli.output.display()))?;

    tracing::info!(
        invoices = invoices.len(),
        line_items = line_items.len(),
        gleans = gleans.len(),
        "glean derivation complete"
    );

    Ok(())
}
