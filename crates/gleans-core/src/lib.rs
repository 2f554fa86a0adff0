//! Glean derivation engine: calendar arithmetic, aggregation, and the five
//! detector pipelines that turn vendor invoice/line-item tables into a flat
//! stream of anomaly/insight records ("gleans").
//!
//! This crate has no file I/O. It consumes already-parsed `Invoice` and
//! `LineItem` slices and returns `Glean` values; reading/writing CSV and
//! parsing date strings are the responsibility of the `gleans-cli` binary.

pub mod aggregate;
pub mod calendar;
pub mod densify;
pub mod detect;
pub mod engine;
pub mod error;
pub mod model;
pub mod numeric;
pub mod validate;

pub use engine::run_engine;
pub use error::{GleanError, GleanResult};
pub use model::{Glean, GleanLocation, GleanType, Invoice, InvoiceId, LineItem, VendorId};
pub use numeric::round2;
pub use validate::validate_invoices;
