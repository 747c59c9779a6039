use {
    super::{audit_repo::insert_audit_entry, billing_repo::apply_settlement},
    crate::domain::{
        BoxFuture,
        audit::NewAuditEntry,
        error::TripayError,
        host::Settlement,
        id::InvoiceId,
        money::{Currency, MoneyAmount},
        store::{StoreUnit, TransactionStore},
        transaction::{TransactionRecord, TransactionStatus},
    },
    sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow},
};

pub struct PgTransactionStore {
    pool: PgPool,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TransactionStore for PgTransactionStore {
    fn begin(&self, invoice_id: InvoiceId) -> BoxFuture<'_, Box<dyn StoreUnit>> {
        Box::pin(async move {
            self.begin_inner(invoice_id)
                .await
                .map(|unit| Box::new(unit) as Box<dyn StoreUnit>)
        })
    }
}

impl PgTransactionStore {
    async fn begin_inner(&self, invoice_id: InvoiceId) -> Result<PgUnit, TripayError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET LOCAL lock_timeout = '5s'")
            .execute(&mut *tx)
            .await?;

        // Serialize all processing for this invoice. The advisory lock
        // works before the row exists, so two first callbacks cannot both
        // insert.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(format!("tripay:{invoice_id}"))
            .execute(&mut *tx)
            .await?;

        let current = find_by_invoice(&mut tx, invoice_id).await?;
        Ok(PgUnit { tx, current })
    }
}

struct PgUnit {
    tx: Transaction<'static, Postgres>,
    current: Option<TransactionRecord>,
}

impl StoreUnit for PgUnit {
    fn current(&self) -> Option<&TransactionRecord> {
        self.current.as_ref()
    }

    fn commit(
        self: Box<Self>,
        record: TransactionRecord,
        audit: NewAuditEntry,
        settlement: Option<Settlement>,
    ) -> BoxFuture<'static, ()> {
        Box::pin(async move { self.commit_inner(record, audit, settlement).await })
    }
}

impl PgUnit {
    async fn commit_inner(
        self: Box<Self>,
        record: TransactionRecord,
        audit: NewAuditEntry,
        settlement: Option<Settlement>,
    ) -> Result<(), TripayError> {
        let PgUnit { mut tx, .. } = *self;
        if let Some(settlement) = &settlement {
            apply_settlement(&mut tx, settlement).await?;
        }
        upsert(&mut tx, &record).await?;
        insert_audit_entry(&mut tx, &audit).await?;
        tx.commit().await?;
        Ok(())
    }
}

pub async fn find_by_invoice(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: InvoiceId,
) -> Result<Option<TransactionRecord>, TripayError> {
    let row = sqlx::query(
        r#"
        SELECT id, invoice_id, gateway_id, merchant_ref, status, txn_id, amount,
               currency, error, payment_method, settled_at, created_at, updated_at
        FROM tripay_transactions
        WHERE invoice_id = $1
        "#,
    )
    .bind(invoice_id.get())
    .fetch_optional(&mut **tx)
    .await?;

    row.as_ref().map(record_from_row).transpose()
}

/// Insert, or update in place on the `invoice_id` unique key.
pub async fn upsert(
    tx: &mut Transaction<'_, Postgres>,
    record: &TransactionRecord,
) -> Result<(), TripayError> {
    sqlx::query(
        r#"
        INSERT INTO tripay_transactions
            (id, invoice_id, gateway_id, merchant_ref, status, txn_id, amount,
             currency, error, payment_method, settled_at, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        ON CONFLICT (invoice_id) DO UPDATE
        SET merchant_ref = EXCLUDED.merchant_ref,
            status = EXCLUDED.status,
            txn_id = EXCLUDED.txn_id,
            amount = EXCLUDED.amount,
            currency = EXCLUDED.currency,
            error = EXCLUDED.error,
            payment_method = EXCLUDED.payment_method,
            settled_at = EXCLUDED.settled_at,
            updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(record.id)
    .bind(record.invoice_id.get())
    .bind(record.gateway_id)
    .bind(record.merchant_ref.as_deref())
    .bind(record.status_str())
    .bind(record.txn_id.as_deref())
    .bind(record.amount.map(|a| a.minor_units()))
    .bind(record.currency.as_ref().map(Currency::as_str))
    .bind(record.error.as_deref())
    .bind(record.payment_method.as_deref())
    .bind(record.settled_at)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

fn record_from_row(row: &PgRow) -> Result<TransactionRecord, TripayError> {
    let status = row
        .try_get::<Option<String>, _>("status")?
        .as_deref()
        .map(TransactionStatus::try_from)
        .transpose()?;
    let amount = row
        .try_get::<Option<i64>, _>("amount")?
        .map(MoneyAmount::new)
        .transpose()?;
    let currency = row
        .try_get::<Option<String>, _>("currency")?
        .as_deref()
        .map(Currency::try_from)
        .transpose()?;

    Ok(TransactionRecord {
        id: row.try_get("id")?,
        invoice_id: InvoiceId::new(row.try_get("invoice_id")?)?,
        gateway_id: row.try_get("gateway_id")?,
        merchant_ref: row.try_get("merchant_ref")?,
        status,
        txn_id: row.try_get("txn_id")?,
        amount,
        currency,
        error: row.try_get("error")?,
        payment_method: row.try_get("payment_method")?,
        settled_at: row.try_get("settled_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
