use {
    crate::domain::{callback::CallbackPayload, error::TripayError, signature},
    std::sync::Arc,
};

/// Authenticate a raw callback body, then decode it.
///
/// The signature is checked over the bytes exactly as received; nothing is
/// parsed before it matches.
pub fn verify_callback(
    raw_body: &[u8],
    signature_header: &str,
    private_key: &str,
) -> Result<CallbackPayload, TripayError> {
    if !signature::verify(raw_body, signature_header, private_key) {
        return Err(TripayError::SignatureMismatch);
    }
    CallbackPayload::decode(raw_body)
}

#[derive(Clone)]
pub struct CallbackVerifier {
    private_key: Arc<str>,
    logging_enabled: bool,
}

impl CallbackVerifier {
    pub fn new(private_key: impl Into<Arc<str>>, logging_enabled: bool) -> Self {
        Self {
            private_key: private_key.into(),
            logging_enabled,
        }
    }

    pub fn verify(
        &self,
        raw_body: &[u8],
        signature_header: &str,
    ) -> Result<CallbackPayload, TripayError> {
        if self.logging_enabled {
            tracing::info!(
                raw = %String::from_utf8_lossy(raw_body),
                "Tripay callback received"
            );
        }

        match verify_callback(raw_body, signature_header, &self.private_key) {
            Ok(payload) => Ok(payload),
            Err(e @ TripayError::SignatureMismatch) => {
                tracing::warn!(body_len = raw_body.len(), "invalid Tripay callback signature");
                Err(e)
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected Tripay callback");
                Err(e)
            }
        }
    }
}
