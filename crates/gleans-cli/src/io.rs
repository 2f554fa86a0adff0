//! CSV ingestion and emission. Parses the two flat input tables into
//! `gleans_core` model types and serializes the engine's glean output.
//!
//! Unparseable dates become `None` (a `DateParseWarning`, logged via
//! `tracing::warn!`) rather than failing the whole row; missing required
//! columns surface as a `csv`/`serde` deserialization error wrapped with
//! `anyhow::Context` (a `SchemaError`).

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use gleans_core::model::{Glean, Invoice, InvoiceId, LineItem, VendorId};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawInvoiceRecord {
    invoice_id: String,
    canonical_vendor_id: String,
    invoice_date: Option<String>,
    due_date: Option<String>,
    period_start_date: Option<String>,
    period_end_date: Option<String>,
    total_amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct RawLineItemRecord {
    invoice_id: String,
    period_start_date: Option<String>,
    period_end_date: Option<String>,
}

fn parse_date(raw: &Option<String>, field: &str, invoice_id: &str) -> Option<NaiveDate> {
    let raw = raw.as_deref()?;
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(err) => {
            tracing::warn!(
                invoice_id,
                field,
                value = raw,
                error = %err,
                "unparseable date, treating field as null"
            );
            None
        }
    }
}

/// Read and parse the invoices table.
pub fn read_invoices(path: &Path) -> Result<Vec<Invoice>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening invoices file {}", path.display()))?;

    let mut invoices = Vec::new();
    for result in reader.deserialize() {
        let raw: RawInvoiceRecord =
            result.with_context(|| format!("reading row from {}", path.display()))?;
        let invoice_date = parse_date(&raw.invoice_date, "invoice_date", &raw.invoice_id);
        let due_date = parse_date(&raw.due_date, "due_date", &raw.invoice_id);
        let period_start_date =
            parse_date(&raw.period_start_date, "period_start_date", &raw.invoice_id);
        let period_end_date =
            parse_date(&raw.period_end_date, "period_end_date", &raw.invoice_id);
        invoices.push(Invoice {
            invoice_id: InvoiceId::from(raw.invoice_id),
            canonical_vendor_id: VendorId::from(raw.canonical_vendor_id),
            invoice_date,
            due_date,
            period_start_date,
            period_end_date,
            total_amount: raw.total_amount,
        });
    }
    tracing::info!(count = invoices.len(), path = %path.display(), "read invoices");
    Ok(invoices)
}

/// Read and parse the line items table.
pub fn read_line_items(path: &Path) -> Result<Vec<LineItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening line items file {}", path.display()))?;

    let mut line_items = Vec::new();
    for result in reader.deserialize() {
        let raw: RawLineItemRecord =
            result.with_context(|| format!("reading row from {}", path.display()))?;
        let period_start_date =
            parse_date(&raw.period_start_date, "period_start_date", &raw.invoice_id);
        let period_end_date =
            parse_date(&raw.period_end_date, "period_end_date", &raw.invoice_id);
        line_items.push(LineItem {
            invoice_id: InvoiceId::from(raw.invoice_id),
            period_start_date,
            period_end_date,
        });
    }
    tracing::info!(count = line_items.len(), path = %path.display(), "read line items");
    Ok(line_items)
}

/// Write the glean table, columns in the exact order `Glean`'s fields are
/// declared in (`glean_date, glean_text, glean_type, glean_location,
/// invoice_id, canonical_vendor_id, glean_id`), matching spec §6.
pub fn write_gleans(path: &Path, gleans: &[Glean]) -> Result<()> {
    // `serialize` only writes the header before the first row, so an empty
    // `gleans` slice would otherwise produce a headerless, 0-byte file.
    // Disable the writer's automatic header and write it explicitly up
    // front instead, so the output always has a header, matching
    // `pandas.to_csv` on an empty frame.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("opening output file {}", path.display()))?;
    writer
        .write_record([
            "glean_date",
            "glean_text",
            "glean_type",
            "glean_location",
            "invoice_id",
            "canonical_vendor_id",
            "glean_id",
        ])
        .with_context(|| format!("writing header to {}", path.display()))?;
    for glean in gleans {
        writer
            .serialize(glean)
            .with_context(|| format!("writing glean {}", glean.glean_id))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing output file {}", path.display()))?;
    tracing::info!(count = gleans.len(), path = %path.display(), "wrote gleans");
    Ok(())
}
