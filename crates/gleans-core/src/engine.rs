//! Engine driver (E): runs the five detectors and concatenates their
//! output into a single ordered glean table.

use crate::detect::{d1, d2, d3, d4, d5};
use crate::error::GleanResult;
use crate::model::{Glean, Invoice, LineItem};
use crate::validate::validate_invoices;

/// Run D1..D5 against the two input tables and return their concatenation
/// with `glean_id` assigned as the zero-based row index.
///
/// Validates the invoice table against spec §3's data model invariants
/// first (see [`validate_invoices`]); a violation is returned as a
/// [`crate::error::GleanError`] rather than propagated into the detectors,
/// which assume those invariants already hold.
///
/// The five detectors are pure functions of the same two read-only slices
/// with no shared mutable state (spec §5), so they are evaluated
/// concurrently via `rayon::join`; the driver still concatenates results in
/// fixed D1..D5 order before assigning `glean_id`, so output is independent
/// of which detector happens to finish first.
pub fn run_engine(invoices: &[Invoice], line_items: &[LineItem]) -> GleanResult<Vec<Glean>> {
    validate_invoices(invoices)?;

    let (((d1_out, d2_out), d3_out), (d4_out, d5_out)) = rayon::join(
        || {
            rayon::join(
                || rayon::join(|| d1::detect(invoices), || d2::detect(invoices, line_items)),
                || d3::detect(invoices),
            )
        },
        || rayon::join(|| d4::detect(invoices), || d5::detect(invoices)),
    );

    let mut gleans = Vec::with_capacity(
        d1_out.len() + d2_out.len() + d3_out.len() + d4_out.len() + d5_out.len(),
    );
    gleans.extend(d1_out);
    gleans.extend(d2_out);
    gleans.extend(d3_out);
    gleans.extend(d4_out);
    gleans.extend(d5_out);

    for (i, g) in gleans.iter_mut().enumerate() {
        g.glean_id = i as u64;
    }

    tracing::info!(count = gleans.len(), "engine run complete");
    Ok(gleans)
}
