use {
    crate::{AppState, adapters::api_errors::ApiError, domain::id::InvoiceId},
    axum::{
        Json,
        extract::{Path, State},
    },
};

#[tracing::instrument(name = "checkout", skip(state))]
pub async fn checkout_handler(
    State(state): State<AppState>,
    Path(invoice_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let invoice_id = InvoiceId::new(invoice_id)?;
    let result = state.checkout.create_checkout(invoice_id).await?;

    Ok(Json(serde_json::json!({
        "checkout_url": result.checkout_url,
        "merchant_ref": result.merchant_ref,
        "reference": result.reference,
    })))
}
