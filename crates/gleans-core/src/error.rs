//! Error types for the glean derivation engine.

use thiserror::Error;

/// Errors the engine can surface. Every field the detectors read is already
/// typed to satisfy spec §3's schema (required columns are non-`Option`
/// Rust fields, so a missing column never reaches this crate — it fails
/// earlier, in `gleans-cli`'s CSV/serde deserialization). The only way to
/// reach this type is [`crate::validate::validate_invoices`] finding a
/// semantic data-model invariant violated.
#[derive(Debug, Error)]
pub enum GleanError {
    /// An invoice violates a §3 data model invariant (e.g. a negative
    /// `total_amount`, or a duplicate `invoice_id`).
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type GleanResult<T> = Result<T, GleanError>;
