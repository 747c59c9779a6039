use {
    super::error::TripayError,
    super::id::MerchantRef,
    super::transaction::CallbackStatus,
    serde::Deserialize,
};

/// Callback body as it comes off the wire. Every field is optional here;
/// [`CallbackPayload::decode`] decides what is required.
#[derive(Debug, Deserialize)]
struct WireCallback {
    merchant_ref: Option<String>,
    status: Option<String>,
    reference: Option<String>,
    payment_method: Option<String>,
    payment_method_code: Option<String>,
    payment_name: Option<String>,
    total_amount: Option<i64>,
    paid_at: Option<i64>,
}

/// A decoded payment-status callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPayload {
    pub merchant_ref: MerchantRef,
    pub status: CallbackStatus,
    /// Gateway transaction id.
    pub reference: Option<String>,
    pub payment_method: Option<String>,
    pub payment_name: Option<String>,
    pub total_amount: Option<i64>,
    pub paid_at: Option<i64>,
}

impl CallbackPayload {
    pub fn decode(raw_body: &[u8]) -> Result<Self, TripayError> {
        let wire: WireCallback = serde_json::from_slice(raw_body)
            .map_err(|e| TripayError::MalformedCallback(format!("invalid JSON: {e}")))?;

        let merchant_ref = wire
            .merchant_ref
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| TripayError::MalformedCallback("missing merchant_ref".into()))?;
        let merchant_ref = MerchantRef::parse(merchant_ref)
            .map_err(|e| TripayError::MalformedCallback(e.to_string()))?;

        let status = wire
            .status
            .filter(|s| !s.is_empty())
            .map(CallbackStatus::from)
            .ok_or_else(|| TripayError::MalformedCallback("missing status".into()))?;

        Ok(Self {
            merchant_ref,
            status,
            reference: wire.reference,
            payment_method: wire.payment_method.or(wire.payment_method_code),
            payment_name: wire.payment_name,
            total_amount: wire.total_amount,
            paid_at: wire.paid_at,
        })
    }

    /// Description attached to the client funds credit.
    pub fn funds_description(&self) -> String {
        format!(
            "Payment Method: {} - {} - Ref no: {}",
            self.payment_method.as_deref().unwrap_or("Unknown"),
            self.payment_name.as_deref().unwrap_or("Unknown"),
            self.reference.as_deref().unwrap_or("Unknown"),
        )
    }
}
