use crate::domain::error::TripayError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub struct ApiError(pub TripayError);

impl From<TripayError> for ApiError {
    fn from(err: TripayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self.0 {
            TripayError::SignatureMismatch => (
                StatusCode::BAD_REQUEST,
                "invalid_signature",
                "invalid callback signature".to_string(),
            ),
            TripayError::MalformedCallback(msg) => (
                StatusCode::BAD_REQUEST,
                "malformed_callback",
                msg.clone(),
            ),
            TripayError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            TripayError::CheckoutCreationFailed(_)
            | TripayError::GatewayUnreachable(_)
            | TripayError::GatewayProtocol(_)
            | TripayError::GatewayRejected { .. } => (
                StatusCode::BAD_GATEWAY,
                "payment_error",
                "the payment could not be started, please try again later".to_string(),
            ),
            err => {
                tracing::error!("internal error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "success": false,
            "error_code": error_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
