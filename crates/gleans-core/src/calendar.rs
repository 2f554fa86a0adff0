//! Calendar arithmetic: month/quarter truncation and dense date ranges.

use chrono::{Datelike, NaiveDate};

/// Truncate a date to the first day of its month.
pub fn month_start(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1).expect("valid year/month always has a day 1")
}

/// Truncate a date to the first day of its quarter.
pub fn quarter_start(d: NaiveDate) -> NaiveDate {
    let quarter_month = ((d.month() - 1) / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(d.year(), quarter_month, 1)
        .expect("valid year/quarter-month always has a day 1")
}

/// Add a signed number of whole months to a date that is already a month
/// start (day = 1). Used for grid stepping and for the "+1 period" span
/// bound the monthly/quarterly detectors need.
pub fn add_months(d: NaiveDate, months: i32) -> NaiveDate {
    let total = d.year() * 12 + (d.month() as i32 - 1) + months;
    let year = total.div_euclid(12);
    let month = (total.rem_euclid(12)) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).expect("month arithmetic stays in range")
}

/// Alignment for [`daterange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Day,
    MonthStart,
    QuarterStart,
}

/// Produce the strictly ascending sequence of dates in `[start, end]`
/// aligned to `step`. For `MonthStart`/`QuarterStart`, `start` need not
/// itself be aligned: the first point emitted is the month/quarter start
/// at or before `start`.
pub fn daterange(start: NaiveDate, end: NaiveDate, step: Step) -> Vec<NaiveDate> {
    match step {
        Step::Day => {
            let mut out = Vec::new();
            let mut d = start;
            while d <= end {
                out.push(d);
                d = match d.succ_opt() {
                    Some(next) => next,
                    None => break,
                };
            }
            out
        }
        Step::MonthStart => {
            let mut out = Vec::new();
            let mut d = month_start(start);
            while d <= end {
                out.push(d);
                d = add_months(d, 1);
            }
            out
        }
        Step::QuarterStart => {
            let mut out = Vec::new();
            let mut d = quarter_start(start);
            while d <= end {
                out.push(d);
                d = add_months(d, 3);
            }
            out
        }
    }
}

/// Day-of-month, 1..31.
pub fn day_of_month(d: NaiveDate) -> u32 {
    d.day()
}

/// 1-based day offset from the start of `d`'s quarter.
pub fn day_of_quarter(d: NaiveDate) -> i64 {
    (d - quarter_start(d)).num_days() + 1
}
