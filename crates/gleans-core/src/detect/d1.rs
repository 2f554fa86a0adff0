//! D1 — vendor not seen in a while (glean_type 1, location 1).

use crate::aggregate::diff_days;
use crate::model::{Glean, GleanType, Invoice, VendorId};
use crate::numeric::{format_pyfloat, round2};
use std::collections::BTreeMap;

/// Fire one glean per invoice preceded by a gap of more than 90 days since
/// that vendor's previous invoice. A vendor's first invoice (gap sentinel
/// `-1`) and same-day repeat invoices (gap `0`) never fire.
pub fn detect(invoices: &[Invoice]) -> Vec<Glean> {
    let mut by_vendor: BTreeMap<&VendorId, Vec<&Invoice>> = BTreeMap::new();
    for inv in invoices {
        if inv.invoice_date.is_some() {
            by_vendor
                .entry(&inv.canonical_vendor_id)
                .or_default()
                .push(inv);
        }
    }

    let mut out = Vec::new();
    for (_vendor, mut invs) in by_vendor {
        invs.sort_by_key(|i| i.invoice_date.unwrap());
        let dates: Vec<_> = invs.iter().map(|i| i.invoice_date.unwrap()).collect();
        let gaps = diff_days(&dates);

        for (i, gap) in gaps.into_iter().enumerate() {
            if gap > 90 {
                let inv = invs[i];
                let months = format_pyfloat(round2(gap as f64 / 30.0));
                let text = format!(
                    "First new bill in {} months from vendor {}",
                    months, inv.canonical_vendor_id
                );
                out.push(Glean::invoice_scoped(
                    inv.invoice_date.unwrap(),
                    text,
                    GleanType::VendorNotSeenInAWhile,
                    inv.invoice_id.clone(),
                    inv.canonical_vendor_id.clone(),
                ));
            }
        }
    }
    tracing::debug!(count = out.len(), "D1 vendor-not-seen-in-a-while fired");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn invoice(id: &str, vendor: &str, date: NaiveDate) -> Invoice {
        Invoice {
            invoice_id: id.into(),
            canonical_vendor_id: vendor.into(),
            invoice_date: Some(date),
            due_date: None,
            period_start_date: None,
            period_end_date: None,
            total_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn fires_once_on_a_long_gap() {
        let invoices = vec![
            invoice("I1", "V1", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            invoice("I2", "V1", NaiveDate::from_ymd_opt(2020, 5, 15).unwrap()),
        ];
        let gleans = detect(&invoices);
        assert_eq!(gleans.len(), 1);
        assert_eq!(gleans[0].glean_date, NaiveDate::from_ymd_opt(2020, 5, 15).unwrap());
        assert_eq!(gleans[0].invoice_id, Some("I2".into()));
        assert_eq!(
            gleans[0].glean_text,
            "First new bill in 4.5 months from vendor V1"
        );
    }

    #[test]
    fn ninety_one_days_fires_ninety_does_not() {
        let fires = vec![
            invoice("I1", "V1", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            invoice("I2", "V1", NaiveDate::from_ymd_opt(2020, 4, 1).unwrap()),
        ];
        let gleans = detect(&fires);
        assert_eq!(gleans.len(), 1);
        assert_eq!(gleans[0].glean_text, "First new bill in 3.03 months from vendor V1");

        let no_fire = vec![
            invoice("I1", "V1", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            invoice("I2", "V1", NaiveDate::from_ymd_opt(2020, 3, 31).unwrap()),
        ];
        assert!(detect(&no_fire).is_empty());
    }

    #[test]
    fn same_day_invoices_never_fire() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let invoices = vec![invoice("I1", "V1", d), invoice("I2", "V1", d)];
        assert!(detect(&invoices).is_empty());
    }

    #[test]
    fn first_invoice_in_history_never_fires() {
        let invoices = vec![invoice(
            "I1",
            "V1",
            NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
        )];
        assert!(detect(&invoices).is_empty());
    }
}
