use {
    crate::{AppState, adapters::api_errors::ApiError, domain::error::TripayError},
    axum::{Json, body::Bytes, extract::State, http::HeaderMap},
};

pub const SIGNATURE_HEADER: &str = "X-Callback-Signature";

#[tracing::instrument(
    name = "tripay_callback",
    skip_all,
    fields(merchant_ref = tracing::field::Empty, status = tracing::field::Empty)
)]
pub async fn callback_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sig = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Tripay callback without signature header");
            TripayError::SignatureMismatch
        })?;

    let payload = state.verifier.verify(&body, sig)?;

    tracing::Span::current()
        .record("merchant_ref", tracing::field::display(&payload.merchant_ref))
        .record("status", tracing::field::display(&payload.status));

    let reconciliation = state.reconciler.reconcile(&payload, "webhook:tripay").await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "status": reconciliation.outcome.as_str(),
    })))
}
