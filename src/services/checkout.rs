use {
    crate::domain::{
        checkout::{NewTransactionParams, OrderItem, TransactionCreateRequest, TransactionCreateResult},
        credentials::GatewayCredentials,
        error::TripayError,
        gateway::PaymentGateway,
        host::BillingHost,
        id::{InvoiceId, MerchantRef},
    },
    chrono::{Duration, Utc},
    std::sync::Arc,
};

/// How long the payer has to complete a checkout.
pub const CHECKOUT_EXPIRY_HOURS: i64 = 24;

/// Turns a host invoice into a gateway checkout.
pub struct CheckoutService {
    host: Arc<dyn BillingHost>,
    gateway: Arc<dyn PaymentGateway>,
    credentials: GatewayCredentials,
    gateway_id: i64,
    logging_enabled: bool,
}

impl CheckoutService {
    pub fn new(
        host: Arc<dyn BillingHost>,
        gateway: Arc<dyn PaymentGateway>,
        credentials: GatewayCredentials,
        gateway_id: i64,
        logging_enabled: bool,
    ) -> Self {
        Self {
            host,
            gateway,
            credentials,
            gateway_id,
            logging_enabled,
        }
    }

    /// Create a gateway transaction for the invoice and return where to send
    /// the payer. Every failure comes back as `CheckoutCreationFailed`.
    pub async fn create_checkout(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<TransactionCreateResult, TripayError> {
        match self.try_create_checkout(invoice_id).await {
            Ok(result) => {
                if self.logging_enabled {
                    tracing::info!(
                        invoice_id = %invoice_id,
                        merchant_ref = %result.merchant_ref,
                        checkout_url = %result.checkout_url,
                        "Tripay transaction created"
                    );
                }
                Ok(result)
            }
            Err(e) => {
                tracing::error!(invoice_id = %invoice_id, error = %e, "checkout creation failed");
                Err(TripayError::CheckoutCreationFailed(e.to_string()))
            }
        }
    }

    async fn try_create_checkout(
        &self,
        invoice_id: InvoiceId,
    ) -> Result<TransactionCreateResult, TripayError> {
        let invoice = self.host.invoice(invoice_id).await?;
        if !invoice.currency.is_idr() {
            return Err(TripayError::Validation(format!(
                "Tripay only accepts IDR, invoice {} is in {}",
                invoice.id, invoice.currency
            )));
        }
        let items = self.host.invoice_items(invoice.id).await?;
        let amount = self.host.total_with_tax(&invoice).await?;

        let now = Utc::now();
        let merchant_ref = MerchantRef::for_invoice(invoice.id, now.timestamp());
        let order_items = items
            .into_iter()
            .map(|item| OrderItem {
                name: item.title,
                unit_price: item.price,
                quantity: item.quantity.unwrap_or(1).max(1),
            })
            .collect();

        let request = TransactionCreateRequest::signed(
            NewTransactionParams {
                merchant_ref,
                amount,
                customer_name: invoice.buyer_name(),
                customer_email: invoice.buyer_email.clone(),
                customer_phone: invoice.buyer_phone.clone(),
                items: order_items,
                return_url: self.host.return_url(&invoice, self.gateway_id),
                expired_time: (now + Duration::hours(CHECKOUT_EXPIRY_HOURS)).timestamp(),
            },
            &self.credentials,
        );

        if self.logging_enabled {
            tracing::info!(
                merchant_ref = %request.merchant_ref(),
                amount = %request.amount(),
                items = request.items().len(),
                "creating Tripay transaction"
            );
            tracing::debug!(
                merchant_code = self.credentials.merchant_code(),
                merchant_ref = %request.merchant_ref(),
                amount = %request.amount(),
                "generated request signature"
            );
        }

        self.gateway.create_transaction(&request).await
    }
}
