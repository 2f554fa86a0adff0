//! Per-vendor densifier: the cross product used as the left side of joins
//! onto a regular calendar grid.

use crate::model::VendorId;
use chrono::NaiveDate;

/// Cross product of `vendors` and `dates`. Order is vendor order as given,
/// then dates ascending; callers needing a different order must re-sort.
pub fn cross_product(vendors: &[VendorId], dates: &[NaiveDate]) -> Vec<(VendorId, NaiveDate)> {
    vendors
        .iter()
        .flat_map(|v| dates.iter().map(move |d| (v.clone(), *d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_product_is_vendor_major_date_minor() {
        let vendors = vec![VendorId::from("V2"), VendorId::from("V1")];
        let dates = vec![
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
        ];
        let grid = cross_product(&vendors, &dates);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0].0, VendorId::from("V2"));
        assert_eq!(grid[1].0, VendorId::from("V2"));
        assert_eq!(grid[2].0, VendorId::from("V1"));
        assert_eq!(grid[0].1, dates[0]);
        assert_eq!(grid[1].1, dates[1]);
    }
}
