use {
    crate::domain::{
        BoxFuture,
        error::TripayError,
        host::{BillingHost, Invoice, InvoiceItem, Settlement},
        id::InvoiceId,
        money::{Currency, MoneyAmount},
    },
    sqlx::{PgPool, Postgres, Row, Transaction},
};

/// Billing host backed by the platform's own invoice tables.
pub struct PgBillingHost {
    pool: PgPool,
    app_url: String,
}

impl PgBillingHost {
    pub fn new(pool: PgPool, app_url: impl Into<String>) -> Self {
        Self {
            pool,
            app_url: app_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl BillingHost for PgBillingHost {
    fn invoice(&self, id: InvoiceId) -> BoxFuture<'_, Invoice> {
        Box::pin(self.fetch_invoice(id))
    }

    fn invoice_items(&self, id: InvoiceId) -> BoxFuture<'_, Vec<InvoiceItem>> {
        Box::pin(self.fetch_items(id))
    }

    fn total_with_tax<'a>(&'a self, invoice: &'a Invoice) -> BoxFuture<'a, MoneyAmount> {
        Box::pin(self.fetch_total(invoice.id))
    }

    fn return_url(&self, invoice: &Invoice, gateway_id: i64) -> String {
        format!(
            "{}/invoice/{}?bb_invoice_id={}&bb_gateway_id={}",
            self.app_url, invoice.hash, invoice.id, gateway_id
        )
    }
}

impl PgBillingHost {
    async fn fetch_invoice(&self, id: InvoiceId) -> Result<Invoice, TripayError> {
        let row = sqlx::query(
            r#"
            SELECT id, hash, client_id, currency, buyer_first_name,
                   buyer_last_name, buyer_email, buyer_phone
            FROM invoice
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| TripayError::Host(format!("invoice {id} not found")))?;

        let currency: String = row.try_get("currency")?;
        Ok(Invoice {
            id: InvoiceId::new(row.try_get("id")?)?,
            hash: row.try_get("hash")?,
            client_id: row.try_get("client_id")?,
            currency: Currency::try_from(currency.as_str())?,
            buyer_first_name: row.try_get("buyer_first_name")?,
            buyer_last_name: row.try_get("buyer_last_name")?,
            buyer_email: row.try_get("buyer_email")?,
            buyer_phone: row.try_get("buyer_phone")?,
        })
    }

    async fn fetch_items(&self, id: InvoiceId) -> Result<Vec<InvoiceItem>, TripayError> {
        let rows = sqlx::query(
            "SELECT title, price, quantity FROM invoice_item WHERE invoice_id = $1 ORDER BY id",
        )
        .bind(id.get())
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(InvoiceItem {
                title: row.try_get("title")?,
                price: MoneyAmount::new(row.try_get("price")?)?,
                quantity: row.try_get::<Option<i32>, _>("quantity")?.map(i64::from),
            });
        }
        Ok(items)
    }

    /// Item subtotal plus tax at the invoice's rate, rounded to whole units.
    async fn fetch_total(&self, id: InvoiceId) -> Result<MoneyAmount, TripayError> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT (s.subtotal + ROUND(s.subtotal * i.taxrate / 100))::BIGINT
            FROM invoice i
            CROSS JOIN LATERAL (
                SELECT COALESCE(SUM(ii.price * COALESCE(ii.quantity, 1)), 0) AS subtotal
                FROM invoice_item ii
                WHERE ii.invoice_id = i.id
            ) s
            WHERE i.id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| TripayError::Host(format!("invoice {id} not found")))?;

        MoneyAmount::new(total)
    }
}

/// Credit the client and mark the invoice paid on the caller's transaction.
/// Fails if the invoice does not exist; the caller's rollback then takes
/// the credit with it.
pub async fn apply_settlement(
    tx: &mut Transaction<'_, Postgres>,
    settlement: &Settlement,
) -> Result<(), TripayError> {
    sqlx::query(
        "INSERT INTO client_balance (client_id, amount, description) VALUES ($1, $2, $3)",
    )
    .bind(settlement.client_id)
    .bind(settlement.amount.amount().minor_units())
    .bind(&settlement.description)
    .execute(&mut **tx)
    .await?;

    let result = sqlx::query("UPDATE invoice SET status = 'paid', paid_at = now() WHERE id = $1")
        .bind(settlement.invoice_id.get())
        .execute(&mut **tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(TripayError::Host(format!(
            "invoice {} not found",
            settlement.invoice_id
        )));
    }
    Ok(())
}
