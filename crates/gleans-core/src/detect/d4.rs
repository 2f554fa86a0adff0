//! D4 — missing invoice, monthly cadence (glean_type 4, location 2).

use crate::aggregate::{mode, rolling_mean};
use crate::calendar::{self, Step};
use crate::model::{Glean, GleanType, Invoice, VendorId};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

const STREAK_WINDOW: usize = 3;

/// Fire one vendor-scoped glean per day a vendor appears overdue against its
/// own historical invoicing cadence — see spec §4.7 for the "late" and
/// "later-than-usual" branches.
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

    let span_start = calendar::month_start(min_date);
    let span_end = calendar::add_months(calendar::month_start(max_date), 1);
    let months = calendar::daterange(span_start, span_end, Step::MonthStart);
    let month_index: BTreeMap<NaiveDate, usize> =
        months.iter().enumerate().map(|(i, m)| (*m, i)).collect();
    // The daily grid must cover every day of the trailing "+1 month" point
    // in `months` too (that's the whole point of D4: a vendor can be
    // overdue in a month with zero invoices of its own), so it runs through
    // the last day of that month rather than stopping at its first day.
    let days_end = calendar::add_months(span_end, 1)
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

        let modal_day = mode(vendor_invoices.iter().map(|d| calendar::day_of_month(*d)));

        let mut invoice_bool = vec![0.0f64; months.len()];
        let mut first_invoice_date: Vec<Option<NaiveDate>> = vec![None; months.len()];
        for d in &vendor_invoices {
            let idx = month_index[&calendar::month_start(*d)];
            invoice_bool[idx] = 1.0;
            first_invoice_date[idx] = Some(match first_invoice_date[idx] {
                Some(existing) if existing <= *d => existing,
                _ => *d,
            });
        }

        let rolling3 = rolling_mean(&invoice_bool, STREAK_WINDOW);
        let streak3: Vec<Option<f64>> = (0..months.len())
            .map(|i| if i >= 1 { rolling3[i - 1] } else { None })
            .collect();

        for d in &days {
            let midx = month_index[&calendar::month_start(*d)];
            let Some(st) = streak3[midx] else { continue };
            if st != 1.0 {
                continue;
            }
            let dom = calendar::day_of_month(*d);
            if dom <= modal_day {
                continue;
            }

            let fires = if invoice_bool[midx] == 0.0 {
                true
            } else {
                match first_invoice_date[midx] {
                    Some(first)
                        if first.year() == d.year()
                            && first.month() == d.month()
                            && calendar::day_of_month(first) > dom =>
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
                "{vendor} generally charges between on {modal_day} day of each month invoices are sent. On {d}, an invoice from {vendor} has not been received",
            );
            out.push(Glean::vendor_scoped(
                *d,
                text,
                GleanType::MissingInvoice,
                vendor.clone(),
            ));
        }
    }
    tracing::debug!(count = out.len(), "D4 missing-invoice-monthly fired");
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
    fn fires_every_day_past_modal_day_when_month_is_silent() {
        let invoices = vec![
            invoice("I1", "V1", date(2020, 1, 10)),
            invoice("I2", "V1", date(2020, 2, 10)),
            invoice("I3", "V1", date(2020, 3, 10)),
        ];
        let gleans = detect(&invoices);
        let april: Vec<_> = gleans
            .iter()
            .filter(|g| g.glean_date.year() == 2020 && g.glean_date.month() == 4)
            .collect();
        assert_eq!(april.len(), 20);
        assert_eq!(april[0].glean_date, date(2020, 4, 11));
        assert_eq!(april[19].glean_date, date(2020, 4, 30));
    }

    #[test]
    fn later_than_usual_fires_between_modal_and_arrival_day() {
        let invoices = vec![
            invoice("I1", "V1", date(2020, 1, 10)),
            invoice("I2", "V1", date(2020, 2, 10)),
            invoice("I3", "V1", date(2020, 3, 10)),
            invoice("I4", "V1", date(2020, 4, 20)),
        ];
        let gleans = detect(&invoices);
        let april: Vec<_> = gleans
            .iter()
            .filter(|g| g.glean_date.year() == 2020 && g.glean_date.month() == 4)
            .collect();
        assert_eq!(april.len(), 9);
        assert_eq!(april[0].glean_date, date(2020, 4, 11));
        assert_eq!(april[8].glean_date, date(2020, 4, 19));
    }

    #[test]
    fn no_streak_before_three_prior_months_never_fires() {
        let invoices = vec![invoice("I1", "V1", date(2020, 1, 10))];
        assert!(detect(&invoices).is_empty());
    }
}
