//! Group-by-vendor reductions shared by the detectors.

use std::collections::BTreeMap;
use std::collections::HashMap;

/// Sum values grouped by key. Missing groups are simply absent from the
/// result; callers fill them with zero after a left-join onto a densified
/// grid. Uses a `BTreeMap` (not `HashMap`) so iteration order is
/// deterministic across runs.
pub fn sum_by<K, V>(rows: impl Iterator<Item = (K, V)>) -> BTreeMap<K, V>
where
    K: Ord,
    V: std::ops::AddAssign + Default,
{
    let mut out: BTreeMap<K, V> = BTreeMap::new();
    for (k, v) in rows {
        out.entry(k).or_insert_with(V::default).add_assign(v);
    }
    out
}

/// Per-group maximum.
pub fn max_by<K, V>(rows: impl Iterator<Item = (K, V)>) -> BTreeMap<K, V>
where
    K: Ord,
    V: Ord + Clone,
{
    let mut out: BTreeMap<K, V> = BTreeMap::new();
    for (k, v) in rows {
        out.entry(k)
            .and_modify(|existing| {
                if v > *existing {
                    *existing = v.clone();
                }
            })
            .or_insert(v);
    }
    out
}

/// Trailing-inclusive rolling mean over a single vendor's period-ordered
/// series. Position `i` uses positions `[i - window + 1, i]`; the first
/// `window - 1` positions are `None`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}

/// Most frequent value, ties broken by first-occurrence order among those
/// tied with the highest count. `0` on empty input.
pub fn mode(values: impl Iterator<Item = u32>) -> u32 {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    let mut first_seen: Vec<u32> = Vec::new();
    for v in values {
        if !counts.contains_key(&v) {
            first_seen.push(v);
        }
        *counts.entry(v).or_insert(0) += 1;
    }
    let mut iter = first_seen.into_iter();
    let Some(mut best) = iter.next() else {
        return 0;
    };
    let mut best_count = counts[&best];
    for v in iter {
        let c = counts[&v];
        if c > best_count {
            best = v;
            best_count = c;
        }
    }
    best
}

/// Consecutive difference (in days) within a pre-sorted-ascending slice of
/// dates. The first element yields the `-1` day sentinel.
pub fn diff_days(dates: &[chrono::NaiveDate]) -> Vec<i64> {
    let mut out = Vec::with_capacity(dates.len());
    for (i, d) in dates.iter().enumerate() {
        if i == 0 {
            out.push(-1);
        } else {
            out.push((*d - dates[i - 1]).num_days());
        }
    }
    out
}
