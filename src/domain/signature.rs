//! HMAC-SHA256 signatures used by the Tripay API.
//!
//! Outbound transaction requests are signed over
//! `merchant_code || merchant_ref || amount`; inbound callbacks are signed
//! over the raw request body exactly as received.

use {
    super::money::MoneyAmount,
    hmac::{Hmac, Mac},
    sha2::Sha256,
};

type HmacSha256 = Hmac<Sha256>;

fn mac(private_key: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(private_key.as_bytes()).expect("HMAC can take key of any size")
}

/// Signature for a transaction-create request, as lowercase hex.
pub fn sign(
    merchant_code: &str,
    merchant_ref: &str,
    amount: MoneyAmount,
    private_key: &str,
) -> String {
    let mut mac = mac(private_key);
    mac.update(merchant_code.as_bytes());
    mac.update(merchant_ref.as_bytes());
    mac.update(amount.minor_units().to_string().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Signature over a raw body, as lowercase hex.
pub fn sign_body(raw_body: &[u8], private_key: &str) -> String {
    let mut mac = mac(private_key);
    mac.update(raw_body);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time check of `received_signature` (hex) against the body.
pub fn verify(raw_body: &[u8], received_signature: &str, private_key: &str) -> bool {
    let Ok(received) = hex::decode(received_signature.trim()) else {
        return false;
    };
    let mut mac = mac(private_key);
    mac.update(raw_body);
    mac.verify_slice(&received).is_ok()
}
