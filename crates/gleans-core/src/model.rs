//! Data model: invoices, line items, and the gleans derived from them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque vendor identifier (`canonical_vendor_id`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(pub String);

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VendorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VendorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque invoice identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub String);

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InvoiceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InvoiceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A vendor invoice.
///
/// `invoice_date` is `None` for rows whose date string failed to parse
/// upstream (a `DateParseWarning`); detectors that require it simply skip
/// such rows rather than treating the absence as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: InvoiceId,
    pub canonical_vendor_id: VendorId,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub period_start_date: Option<NaiveDate>,
    pub period_end_date: Option<NaiveDate>,
    pub total_amount: Decimal,
}

/// A line item belonging to an invoice (many-to-one via `invoice_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub invoice_id: InvoiceId,
    pub period_start_date: Option<NaiveDate>,
    pub period_end_date: Option<NaiveDate>,
}

/// The kind of anomaly/insight a glean represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GleanType {
    VendorNotSeenInAWhile = 1,
    AccrualAlert = 2,
    LargeMonthIncrease = 3,
    MissingInvoice = 4,
}

impl Serialize for GleanType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for GleanType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = u8::deserialize(deserializer)?;
        match v {
            1 => Ok(GleanType::VendorNotSeenInAWhile),
            2 => Ok(GleanType::AccrualAlert),
            3 => Ok(GleanType::LargeMonthIncrease),
            4 => Ok(GleanType::MissingInvoice),
            other => Err(serde::de::Error::custom(format!(
                "invalid glean_type {other}"
            ))),
        }
    }
}

/// Whether a glean is scoped to a single invoice or to a vendor as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GleanLocation {
    Invoice = 1,
    Vendor = 2,
}

impl Serialize for GleanLocation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for GleanLocation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = u8::deserialize(deserializer)?;
        match v {
            1 => Ok(GleanLocation::Invoice),
            2 => Ok(GleanLocation::Vendor),
            other => Err(serde::de::Error::custom(format!(
                "invalid glean_location {other}"
            ))),
        }
    }
}

/// A single derived anomaly/insight record.
///
/// `glean_id` is a placeholder (`0`) until the engine driver assigns the
/// final zero-based sequence number over the concatenated detector output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glean {
    pub glean_date: NaiveDate,
    pub glean_text: String,
    pub glean_type: GleanType,
    pub glean_location: GleanLocation,
    pub invoice_id: Option<InvoiceId>,
    pub canonical_vendor_id: VendorId,
    pub glean_id: u64,
}

impl Glean {
    /// Construct an invoice-scoped glean (`glean_location = 1`).
    pub fn invoice_scoped(
        glean_date: NaiveDate,
        glean_text: String,
        glean_type: GleanType,
        invoice_id: InvoiceId,
        canonical_vendor_id: VendorId,
    ) -> Self {
        Self {
            glean_date,
            glean_text,
            glean_type,
            glean_location: GleanLocation::Invoice,
            invoice_id: Some(invoice_id),
            canonical_vendor_id,
            glean_id: 0,
        }
    }

    /// Construct a vendor-scoped glean (`glean_location = 2`, no invoice id).
    pub fn vendor_scoped(
        glean_date: NaiveDate,
        glean_text: String,
        glean_type: GleanType,
        canonical_vendor_id: VendorId,
    ) -> Self {
        Self {
            glean_date,
            glean_text,
            glean_type,
            glean_location: GleanLocation::Vendor,
            invoice_id: None,
            canonical_vendor_id,
            glean_id: 0,
        }
    }
}
