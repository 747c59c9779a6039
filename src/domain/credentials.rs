use {super::error::TripayError, std::fmt};

pub const PRODUCTION_BASE_URL: &str = "https://tripay.co.id/api";
pub const SANDBOX_BASE_URL: &str = "https://tripay.co.id/api-sandbox";

/// The credential set in effect for one adapter instance. Sandbox and
/// production keys are resolved once, when this value is built.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayCredentials {
    api_key: String,
    private_key: String,
    merchant_code: String,
    sandbox_mode: bool,
}

impl GatewayCredentials {
    pub fn new(
        api_key: impl Into<String>,
        private_key: impl Into<String>,
        merchant_code: impl Into<String>,
        sandbox_mode: bool,
    ) -> Result<Self, TripayError> {
        let api_key = required(api_key.into(), "API Key")?;
        let private_key = required(private_key.into(), "Private Key")?;
        let merchant_code = required(merchant_code.into(), "Merchant Code")?;
        Ok(Self {
            api_key,
            private_key,
            merchant_code,
            sandbox_mode,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn merchant_code(&self) -> &str {
        &self.merchant_code
    }

    pub fn sandbox_mode(&self) -> bool {
        self.sandbox_mode
    }

    pub fn base_url(&self) -> &'static str {
        if self.sandbox_mode {
            SANDBOX_BASE_URL
        } else {
            PRODUCTION_BASE_URL
        }
    }
}

fn required(value: String, name: &str) -> Result<String, TripayError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(TripayError::Configuration(format!("missing {name}")));
    }
    Ok(value)
}

impl fmt::Debug for GatewayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayCredentials")
            .field("api_key", &"<redacted>")
            .field("private_key", &"<redacted>")
            .field("merchant_code", &self.merchant_code)
            .field("sandbox_mode", &self.sandbox_mode)
            .finish()
    }
}
