//! D5 — missing invoice, quarterly cadence (glean_type 4, location 2).
//!
//! Identical structure to [`crate::detect::d4`] but evaluated over quarters
//! instead of months: a 2-quarter trailing streak instead of 3-month, and
//! `day_of_quarter`/`quarter_start` in place of `day_of_month`/`month_start`.

use crate::aggregate::{mode, rolling_mean};
use crate::calendar::{self, Step};
use crate::model::{Glean, GleanType, Invoice, VendorId};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

const STREAK_WINDOW: usize = 2;

/// Fire one vendor-scoped glean per day a vendor appears overdue against its
/// own historical quarterly cadence — see spec §4.8.
pub fn detect(invoices: &[Invoice]) -> Vec<Glean> {
    let dated: Vec<&Invoice> = invoices
        .iter()
        .filter(|i| i.invoice_date.is_some())
        .collect();
    if dated.is_empty() {
        return Vec::new();
    }

    let mut vendors: BTreeSet<VendorId> = BTreeSet::new();
    let mut min_date = dated[0].invoice_date.unwrap();
    let mut max_date = dated[0].invoice_date.unwrap();
    for inv in &dated {
        vendors.insert(inv.canonical_vendor_id.clone());
        let d = inv.invoice_date.unwrap();
        if d < min_date {
            min_date = d;
        }
        if d > max_date {
            max_date = d;
        }
    }

    let span_start = calendar::quarter_start(min_date);
    let span_end = calendar::add_months(calendar::quarter_start(max_date), 3);
    let quarters = calendar::daterange(span_start, span_end, Step::QuarterStart);
    let quarter_index: BTreeMap<NaiveDate, usize> =
        quarters.iter().enumerate().map(|(i, q)| (*q, i)).collect();
    let days_end = calendar::add_months(span_end, 3)
        .pred_opt()
        .expect("month arithmetic stays in range");
    let days = calendar::daterange(span_start, days_end, Step::Day);

    let mut out = Vec::new();
    for vendor in &vendors {
        let vendor_invoices: Vec<NaiveDate> = dated
            .iter()
            .filter(|i| i.canonical_vendor_id == *vendor)
            .map(|i| i.invoice_date.unwrap())
            .collect();

        let modal_qday = mode(vendor_invoices.iter().map(|d| calendar::day_of_quarter(*d) as u32));

        let mut invoice_bool = vec![0.0f64; quarters.len()];
        let mut first_invoice_date: Vec<Option<NaiveDate>> = vec![None; quarters.len()];
        for d in &vendor_invoices {
            let idx = quarter_index[&calendar::quarter_start(*d)];
            invoice_bool[idx] = 1.0;
            first_invoice_date[idx] = Some(match first_invoice_date[idx] {
                Some(existing) if existing <= *d => existing,
                _ => *d,
            });
        }

        let rolling2 = rolling_mean(&invoice_bool, STREAK_WINDOW);
        let streak2: Vec<Option<f64>> = (0..quarters.len())
            .map(|i| if i >= 1 { rolling2[i - 1] } else { None })
            .collect();

        for d in &days {
            let qidx = quarter_index[&calendar::quarter_start(*d)];
            let Some(st) = streak2[qidx] else { continue };
            if st != 1.0 {
                continue;
            }
            let doq = calendar::day_of_quarter(*d) as u32;
            if doq <= modal_qday {
                continue;
            }

            let fires = if invoice_bool[qidx] == 0.0 {
                true
            } else {
                match first_invoice_date[qidx] {
                    Some(first)
                        if calendar::quarter_start(first) == calendar::quarter_start(*d)
                            && calendar::day_of_quarter(first) as u32 > doq =>
                    {
                        true
                    }
                    _ => false,
                }
            };
            if !fires {
                continue;
            }

            let text = format!(
                "{vendor} generally charges between on {modal_qday} day of each quarter invoices are sent. On {d}, an invoice from {vendor} has not been received",
            );
            out.push(Glean::vendor_scoped(
                *d,
                text,
                GleanType::MissingInvoice,
                vendor.clone(),
            ));
        }
    }
    tracing::debug!(count = out.len(), "D5 missing-invoice-quarterly fired");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(id: &str, vendor: &str, invoice_date: NaiveDate) -> Invoice {
        Invoice {
            invoice_id: id.into(),
            canonical_vendor_id: vendor.into(),
            invoice_date: Some(invoice_date),
            due_date: None,
            period_start_date: None,
            period_end_date: None,
            total_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn fires_between_modal_day_and_later_arrival_in_q3() {
        let invoices = vec![
            invoice("I1", "V1", date(2020, 1, 15)), // Q1 day 15
            invoice("I2", "V1", date(2020, 4, 15)), // Q2 day 15
            invoice("I3", "V1", date(2020, 8, 9)),  // Q3 day 40
        ];
        let gleans = detect(&invoices);
        let q3: Vec<_> = gleans
            .iter()
            .filter(|g| calendar::quarter_start(g.glean_date) == date(2020, 7, 1))
            .collect();
        assert_eq!(q3.len(), 24); // day_of_quarter in 16..=39
        assert!(q3.iter().all(|g| {
            let doq = calendar::day_of_quarter(g.glean_date);
            doq > 15 && doq < 40
        }));
    }

    #[test]
    fn no_streak_before_two_prior_quarters_never_fires() {
        let invoices = vec![invoice("I1", "V1", date(2020, 1, 15))];
        assert!(detect(&invoices).is_empty());
    }
}
