use {
    crate::domain::{
        BoxFuture,
        checkout::{TransactionCreateRequest, TransactionCreateResult},
        credentials::GatewayCredentials,
        error::TripayError,
        gateway::PaymentGateway,
    },
    serde_json::Value,
    std::time::Duration,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TripayClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    logging_enabled: bool,
}

impl TripayClient {
    /// `base_url` overrides the sandbox/production root picked from the
    /// credentials.
    pub fn new(
        credentials: &GatewayCredentials,
        base_url: Option<&str>,
        timeout: Duration,
        logging_enabled: bool,
    ) -> Result<Self, TripayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| TripayError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url
                .unwrap_or(credentials.base_url())
                .trim_end_matches('/')
                .to_string(),
            api_key: credentials.api_key().to_string(),
            logging_enabled,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PaymentGateway for TripayClient {
    fn create_transaction<'a>(
        &'a self,
        request: &'a TransactionCreateRequest,
    ) -> BoxFuture<'a, TransactionCreateResult> {
        Box::pin(async move { self.create_transaction_inner(request).await })
    }
}

impl TripayClient {
    async fn create_transaction_inner(
        &self,
        request: &TransactionCreateRequest,
    ) -> Result<TransactionCreateResult, TripayError> {
        let url = format!("{}/transaction/create", self.base_url);

        if self.logging_enabled {
            tracing::info!(
                url = %url,
                request = %serde_json::to_string(request)?,
                "sending Tripay transaction request"
            );
        }

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.unreachable(e))?;

        let raw: Value = serde_json::from_str(&body).map_err(|e| {
            if self.logging_enabled {
                tracing::error!(%status, body = %body, "Tripay API returned a non-JSON body");
            }
            TripayError::GatewayProtocol(format!("HTTP {status}: {e}"))
        })?;

        let Some(checkout_url) = raw
            .pointer("/data/checkout_url")
            .and_then(Value::as_str)
            .map(str::to_string)
        else {
            if self.logging_enabled {
                tracing::error!(%status, body = %body, "Tripay API rejected transaction");
            }
            let message = raw
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(body);
            return Err(TripayError::GatewayRejected { message });
        };

        let reference = raw
            .pointer("/data/reference")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(TransactionCreateResult {
            checkout_url,
            merchant_ref: request.merchant_ref().clone(),
            reference,
            raw,
        })
    }

    fn unreachable(&self, e: reqwest::Error) -> TripayError {
        if self.logging_enabled {
            tracing::error!(error = %e, "Tripay API error");
        }
        TripayError::GatewayUnreachable(e.to_string())
    }
}
