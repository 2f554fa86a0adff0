//! D3 — large month increase, month-to-date (glean_type 3, location 2).

use crate::aggregate::{rolling_mean, sum_by};
use crate::calendar::{self, Step};
use crate::model::{Glean, GleanType, Invoice, VendorId};
use crate::numeric::{format_pyfloat, round2};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

const TRAILING_WINDOW: usize = 12;

/// Fire one vendor-scoped glean per (vendor, month) whose total spend is an
/// outlier against the trailing-12-month mean, per the banded thresholds in
/// spec §4.6. Months with fewer than 12 prior data points never fire.
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

    let span_end = calendar::add_months(calendar::month_start(max_date), 1);
    let months = calendar::daterange(calendar::month_start(min_date), span_end, Step::MonthStart);

    let sums: BTreeMap<(VendorId, chrono::NaiveDate), Decimal> = sum_by(dated.iter().map(|inv| {
        (
            (
                inv.canonical_vendor_id.clone(),
                calendar::month_start(inv.invoice_date.unwrap()),
            ),
            inv.total_amount,
        )
    }));

    let mut out = Vec::new();
    for vendor in &vendors {
        let series: Vec<Decimal> = months
            .iter()
            .map(|m| {
                sums.get(&(vendor.clone(), *m))
                    .copied()
                    .unwrap_or(Decimal::ZERO)
            })
            .collect();
        let as_f64: Vec<f64> = series.iter().map(|d| d.to_f64().unwrap_or(0.0)).collect();
        let means = rolling_mean(&as_f64, TRAILING_WINDOW);

        for (i, month) in months.iter().enumerate() {
            let Some(mu) = means[i] else { continue };
            if mu <= 0.0 {
                continue;
            }
            let x = as_f64[i];
            let fires = x >= 100.0
                && ((x > 10000.0 && x > 0.5 * mu)
                    || (x > 1000.0 && x < 10000.0 && x > 2.0 * mu)
                    || (x < 1000.0 && x > 5.0 * mu));
            if !fires {
                continue;
            }
            let pct = round2(x / mu * 100.0);
            let text = format!(
                "Monthly spend with {} is ${} ({}%) higher than average.",
                vendor,
                format_pyfloat(x),
                format_pyfloat(pct)
            );
            out.push(Glean::vendor_scoped(
                *month,
                text,
                GleanType::LargeMonthIncrease,
                vendor.clone(),
            ));
        }
    }
    tracing::debug!(count = out.len(), "D3 large-month-increase fired");
    out
}
