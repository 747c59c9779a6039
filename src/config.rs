use {
    crate::domain::{credentials::GatewayCredentials, error::TripayError},
    std::time::Duration,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Everything the service reads from its environment, resolved once.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: GatewayCredentials,
    pub logging_enabled: bool,
    pub gateway_id: i64,
    pub base_url: Option<String>,
    pub app_url: String,
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub http_timeout: Duration,
}

impl Settings {
    /// Read settings from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self, TripayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Sandbox mode switches every
    /// credential to its `TRIPAY_SANDBOX_*` variant.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TripayError> {
        let sandbox_mode = flag(lookup("TRIPAY_USE_SANDBOX"));
        let credential = |name: &str| {
            let key = if sandbox_mode {
                format!("TRIPAY_SANDBOX_{name}")
            } else {
                format!("TRIPAY_{name}")
            };
            lookup(&key).unwrap_or_default()
        };

        let credentials = GatewayCredentials::new(
            credential("API_KEY"),
            credential("PRIVATE_KEY"),
            credential("MERCHANT_CODE"),
            sandbox_mode,
        )?;

        let gateway_id = match lookup("TRIPAY_GATEWAY_ID") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                TripayError::Configuration(format!("TRIPAY_GATEWAY_ID is not a number: {raw}"))
            })?,
            None => 1,
        };

        let http_timeout = match lookup("TRIPAY_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                TripayError::Configuration(format!(
                    "TRIPAY_HTTP_TIMEOUT_SECS is not a number: {raw}"
                ))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            credentials,
            logging_enabled: flag(lookup("TRIPAY_ENABLE_LOGGING")),
            gateway_id,
            base_url: lookup("TRIPAY_BASE_URL").filter(|s| !s.trim().is_empty()),
            app_url: lookup("APP_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            http_timeout: Duration::from_secs(http_timeout),
        })
    }
}

fn flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("1") | Some("true") | Some("yes") | Some("on")
    )
}
