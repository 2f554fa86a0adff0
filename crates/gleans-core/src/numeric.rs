//! Rounding helpers shared by the glean text templates.

/// Round to 2 decimal places, half-away-from-zero — matches the reference
/// implementation's `numpy.round(x, 2)` for the `MONTHS` and `PCT` values
/// in the glean text templates. `f64::round` already rounds ties away from
/// zero, so this is exact scaling around it.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Render a number the way the Python/numpy float reference does: at least
/// one digit after the decimal point, no trailing zeros beyond that.
/// Rust's `{}` on `f64` drops the fractional part entirely for
/// integer-valued floats (`4.0` prints as `"4"`), which would diverge from
/// the reference's `"4.0"`; this fixes that without reintroducing
/// trailing-zero noise for values that do have a fractional part
/// (`4.5` stays `"4.5"`, not `"4.50"`).
pub fn format_pyfloat(x: f64) -> String {
    let fixed = format!("{x:.2}");
    let trimmed = fixed.trim_end_matches('0');
    if let Some(stripped) = trimmed.strip_suffix('.') {
        format!("{stripped}.0")
    } else {
        trimmed.to_string()
    }
}
