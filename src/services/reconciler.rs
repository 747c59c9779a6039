use {
    crate::domain::{
        callback::CallbackPayload,
        error::TripayError,
        host::{BillingHost, Settlement},
        id::InvoiceId,
        money::Money,
        store::TransactionStore,
        transaction::{ReconcileOutcome, Reconciliation, TransactionRecord, TransactionStatus},
    },
    chrono::Utc,
    std::sync::Arc,
};

/// Applies gateway callbacks to the per-invoice transaction record.
pub struct Reconciler {
    store: Arc<dyn TransactionStore>,
    host: Arc<dyn BillingHost>,
    gateway_id: i64,
    logging_enabled: bool,
}

impl Reconciler {
    pub fn new(
        store: Arc<dyn TransactionStore>,
        host: Arc<dyn BillingHost>,
        gateway_id: i64,
        logging_enabled: bool,
    ) -> Self {
        Self {
            store,
            host,
            gateway_id,
            logging_enabled,
        }
    }

    /// Map the callback status onto the invoice's record under the invoice
    /// lock, settling the invoice on the first PAID.
    ///
    /// Settlement happens at most once per invoice: the record's
    /// `settled_at` marker is checked under the lock, and the client credit
    /// and mark-paid are committed in the same unit of work as the marker.
    /// On any failure nothing is committed.
    pub async fn reconcile(
        &self,
        payload: &CallbackPayload,
        actor: &str,
    ) -> Result<Reconciliation, TripayError> {
        let invoice_id = payload.merchant_ref.invoice_id();
        let transition = payload.status.transition();

        // Host reads happen before the lock so the holder never waits on a
        // second connection.
        let prepared = if transition.settles {
            let settlement = self.prepare_settlement(invoice_id, payload).await.map_err(|e| {
                tracing::error!(
                    invoice_id = %invoice_id,
                    merchant_ref = %payload.merchant_ref,
                    error = %e,
                    "cannot prepare settlement"
                );
                TripayError::ReconciliationFailed(e.to_string())
            })?;
            Some(settlement)
        } else {
            None
        };

        let unit = self.store.begin(invoice_id).await.map_err(|e| {
            tracing::error!(invoice_id = %invoice_id, error = %e, "failed to lock transaction record");
            TripayError::ReconciliationFailed(e.to_string())
        })?;

        let now = Utc::now();
        let existing = unit.current().cloned();
        let is_new = existing.is_none();
        let mut record = existing
            .unwrap_or_else(|| TransactionRecord::new(invoice_id, self.gateway_id, now));
        let old_status = record.status_str();

        let mut settlement = None;
        let outcome = match prepared {
            Some(_) if record.is_settled() => ReconcileOutcome::AlreadySettled,
            Some(prepared) => {
                record.apply_settlement(prepared.amount.clone(), payload.reference.clone(), now);
                settlement = Some(prepared);
                ReconcileOutcome::Settled
            }
            None if record.is_settled() && transition.status != TransactionStatus::Refunded => {
                tracing::warn!(
                    invoice_id = %invoice_id,
                    current = ?old_status,
                    incoming = %payload.status,
                    "status would regress a settled invoice, logged as anomaly"
                );
                ReconcileOutcome::Anomaly
            }
            None => {
                record.status = Some(transition.status);
                record.error = transition.error_note;
                if is_new {
                    ReconcileOutcome::Created
                } else {
                    ReconcileOutcome::Updated
                }
            }
        };

        record.merchant_ref = Some(payload.merchant_ref.as_str().to_string());
        if payload.payment_method.is_some() {
            record.payment_method = payload.payment_method.clone();
        }
        record.updated_at = now;

        let audit = record.audit_entry(
            actor,
            outcome.as_str(),
            serde_json::json!({
                "merchant_ref": payload.merchant_ref.as_str(),
                "incoming_status": payload.status.as_str(),
                "old_status": old_status,
                "new_status": record.status_str(),
                "reference": payload.reference,
            }),
        );

        let settled_amount = settlement.as_ref().map(|s| s.amount.clone());
        if let Err(e) = unit.commit(record.clone(), audit, settlement).await {
            tracing::error!(
                invoice_id = %invoice_id,
                outcome = outcome.as_str(),
                error = %e,
                "failed to commit transaction record, nothing persisted"
            );
            return Err(TripayError::ReconciliationFailed(e.to_string()));
        }

        if self.logging_enabled {
            if let Some(amount) = &settled_amount {
                tracing::info!(
                    invoice_id = %invoice_id,
                    amount = %amount.amount(),
                    currency = %amount.currency(),
                    "invoice settled"
                );
            }
            tracing::info!(
                transaction_id = %record.id,
                invoice_id = %invoice_id,
                status = ?record.status_str(),
                outcome = outcome.as_str(),
                "transaction status updated"
            );
        }

        Ok(Reconciliation { record, outcome })
    }

    /// Manually triggered processing of a callback body the caller already
    /// trusts. No signature check; same reconciliation as the webhook.
    pub async fn process_transaction(
        &self,
        raw_body: &[u8],
        actor: &str,
    ) -> Result<Reconciliation, TripayError> {
        let payload = CallbackPayload::decode(raw_body)?;
        if self.logging_enabled {
            tracing::info!(merchant_ref = %payload.merchant_ref, actor, "processing transaction");
        }
        self.reconcile(&payload, actor).await
    }

    async fn prepare_settlement(
        &self,
        invoice_id: InvoiceId,
        payload: &CallbackPayload,
    ) -> Result<Settlement, TripayError> {
        let invoice = self.host.invoice(invoice_id).await?;
        let total = self.host.total_with_tax(&invoice).await?;

        Ok(Settlement {
            invoice_id: invoice.id,
            client_id: invoice.client_id,
            amount: Money::new(total, invoice.currency),
            description: payload.funds_description(),
        })
    }
}
