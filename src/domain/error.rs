use thiserror::Error;

#[derive(Debug, Error)]
pub enum TripayError {
    /// A required credential is missing. Fatal at start-up.
    #[error("the Tripay payment gateway is not fully configured: {0}")]
    Configuration(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("gateway unreachable: {0}")]
    GatewayUnreachable(String),

    #[error("gateway protocol error: {0}")]
    GatewayProtocol(String),

    #[error("gateway rejected transaction: {message}")]
    GatewayRejected { message: String },

    #[error("callback signature mismatch")]
    SignatureMismatch,

    #[error("malformed callback: {0}")]
    MalformedCallback(String),

    #[error("reconciliation failed: {0}")]
    ReconciliationFailed(String),

    #[error("error processing Tripay payment: {0}")]
    CheckoutCreationFailed(String),

    #[error("host: {0}")]
    Host(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
