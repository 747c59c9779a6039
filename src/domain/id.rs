use derive_more::Display;
use serde::{Deserialize, Serialize, Serializer};

use super::error::TripayError;

/// Host invoice identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(i64);

impl InvoiceId {
    pub fn new(id: i64) -> Result<Self, TripayError> {
        if id <= 0 {
            return Err(TripayError::Validation(format!(
                "InvoiceId must be positive, got: {id}"
            )));
        }
        Ok(Self(id))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

/// Merchant reference correlating a checkout attempt with its callbacks.
///
/// Generated as `INV-{invoice_id}-{unix_seconds}`, so every attempt gets a
/// fresh reference while the invoice stays recoverable from it. A bare
/// numeric reference is accepted as the invoice id itself.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{raw}")]
pub struct MerchantRef {
    raw: String,
    invoice_id: InvoiceId,
}

impl MerchantRef {
    pub fn for_invoice(invoice_id: InvoiceId, unix_seconds: i64) -> Self {
        Self {
            raw: format!("INV-{invoice_id}-{unix_seconds}"),
            invoice_id,
        }
    }

    pub fn parse(raw: impl Into<String>) -> Result<Self, TripayError> {
        let raw = raw.into();
        let id_part = match raw.strip_prefix("INV-") {
            Some(rest) => rest.split_once('-').map(|(id, _)| id).unwrap_or(rest),
            None => raw.as_str(),
        };
        let invoice_id = id_part
            .parse::<i64>()
            .map_err(|_| TripayError::Validation(format!("unrecognised merchant_ref: {raw}")))
            .and_then(InvoiceId::new)?;
        Ok(Self { raw, invoice_id })
    }

    pub fn invoice_id(&self) -> InvoiceId {
        self.invoice_id
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Serialize for MerchantRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
