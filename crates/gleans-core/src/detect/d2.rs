//! D2 — accrual alert (glean_type 2, location 1).

use crate::model::{Glean, GleanType, Invoice, InvoiceId, LineItem};
use std::collections::HashMap;

/// Fire one glean per invoice whose latest covered period (its own
/// `period_end_date`, or any joined line item's `period_end_date`, max of
/// the two) ends more than 90 days after the invoice date.
pub fn detect(invoices: &[Invoice], line_items: &[LineItem]) -> Vec<Glean> {
    let mut line_item_max_end: HashMap<&InvoiceId, chrono::NaiveDate> = HashMap::new();
    for li in line_items {
        if let Some(end) = li.period_end_date {
            line_item_max_end
                .entry(&li.invoice_id)
                .and_modify(|existing| {
                    if end > *existing {
                        *existing = end;
                    }
                })
                .or_insert(end);
        }
    }

    let mut out = Vec::new();
    for inv in invoices {
        let Some(invoice_date) = inv.invoice_date else {
            continue;
        };
        let latest = [inv.period_end_date, line_item_max_end.get(&inv.invoice_id).copied()]
            .into_iter()
            .flatten()
            .max();
        let Some(latest_period_end_date) = latest else {
            continue;
        };
        if (latest_period_end_date - invoice_date).num_days() > 90 {
            let text = format!(
                "Line items from vendor {} in this invoice cover future periods (through {})",
                inv.canonical_vendor_id, latest_period_end_date
            );
            out.push(Glean::invoice_scoped(
                invoice_date,
                text,
                GleanType::AccrualAlert,
                inv.invoice_id.clone(),
                inv.canonical_vendor_id.clone(),
            ));
        }
    }
    tracing::debug!(count = out.len(), "D2 accrual-alert fired");
    out
}
