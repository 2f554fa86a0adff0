//! Data-model invariant validation (spec §3), run once before the engine
//! derives gleans from an invoice table.

use crate::error::{GleanError, GleanResult};
use crate::model::{Invoice, InvoiceId};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Validate the invoice table against the invariants spec §3 states:
/// `total_amount` is a non-negative real number, and `invoice_id` is unique.
///
/// Detectors are typed to assume these hold (e.g. D3's bands are meaningless
/// for a negative spend, and D1/D2's per-invoice joins assume one row per
/// id), so this runs once up front rather than being re-checked per
/// detector.
pub fn validate_invoices(invoices: &[Invoice]) -> GleanResult<()> {
    let mut seen: HashSet<&InvoiceId> = HashSet::with_capacity(invoices.len());
    for inv in invoices {
        if inv.total_amount < Decimal::ZERO {
            return Err(GleanError::InvalidData(format!(
                "invoice {} has a negative total_amount ({})",
                inv.invoice_id, inv.total_amount
            )));
        }
        if !seen.insert(&inv.invoice_id) {
            return Err(GleanError::InvalidData(format!(
                "duplicate invoice_id {}",
                inv.invoice_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VendorId;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn invoice(id: &str, amount: Decimal) -> Invoice {
        Invoice {
            invoice_id: id.into(),
            canonical_vendor_id: VendorId::from("V1"),
            invoice_date: Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            due_date: None,
            period_start_date: None,
            period_end_date: None,
            total_amount: amount,
        }
    }

    #[test]
    fn rejects_negative_total_amount() {
        let invoices = vec![invoice("I1", dec!(-1))];
        assert!(validate_invoices(&invoices).is_err());
    }

    #[test]
    fn rejects_duplicate_invoice_id() {
        let invoices = vec![invoice("I1", dec!(100)), invoice("I1", dec!(50))];
        assert!(validate_invoices(&invoices).is_err());
    }

    #[test]
    fn accepts_well_formed_invoices() {
        let invoices = vec![invoice("I1", dec!(100)), invoice("I2", dec!(50))];
        assert!(validate_invoices(&invoices).is_ok());
    }

    #[test]
    fn accepts_zero_amount() {
        let invoices = vec![invoice("I1", dec!(0))];
        assert!(validate_invoices(&invoices).is_ok());
    }
}
