use {
    super::credentials::GatewayCredentials,
    super::id::MerchantRef,
    super::money::MoneyAmount,
    super::signature,
    serde::Serialize,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: MoneyAmount,
    pub quantity: i64,
}

/// Everything a transaction request carries except the signature.
#[derive(Debug, Clone)]
pub struct NewTransactionParams {
    pub merchant_ref: MerchantRef,
    pub amount: MoneyAmount,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub items: Vec<OrderItem>,
    pub return_url: String,
    /// Unix seconds.
    pub expired_time: i64,
}

/// Body of `POST /transaction/create`.
///
/// Only constructible through [`TransactionCreateRequest::signed`], so the
/// signature always covers `merchant_code`, `merchant_ref` and `amount` of
/// this very request.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionCreateRequest {
    method: String,
    merchant_ref: MerchantRef,
    amount: MoneyAmount,
    customer_name: String,
    customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_phone: Option<String>,
    order_items: Vec<OrderItem>,
    return_url: String,
    expired_time: i64,
    signature: String,
}

impl TransactionCreateRequest {
    pub fn signed(params: NewTransactionParams, credentials: &GatewayCredentials) -> Self {
        let signature = signature::sign(
            credentials.merchant_code(),
            params.merchant_ref.as_str(),
            params.amount,
            credentials.private_key(),
        );
        Self {
            // Empty method lets the payer pick a channel on the gateway page.
            method: String::new(),
            merchant_ref: params.merchant_ref,
            amount: params.amount,
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            customer_phone: params.customer_phone,
            order_items: params.items,
            return_url: params.return_url,
            expired_time: params.expired_time,
            signature,
        }
    }

    pub fn merchant_ref(&self) -> &MerchantRef {
        &self.merchant_ref
    }

    pub fn amount(&self) -> MoneyAmount {
        self.amount
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn customer_phone(&self) -> Option<&str> {
        self.customer_phone.as_deref()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.order_items
    }

    pub fn return_url(&self) -> &str {
        &self.return_url
    }

    pub fn expired_time(&self) -> i64 {
        self.expired_time
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// A transaction the gateway accepted.
#[derive(Debug, Clone)]
pub struct TransactionCreateResult {
    pub checkout_url: String,
    pub merchant_ref: MerchantRef,
    /// Gateway transaction id, when the response carries one.
    pub reference: Option<String>,
    pub raw: serde_json::Value,
}
