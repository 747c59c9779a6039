use super::{
    BoxFuture, audit::NewAuditEntry, host::Settlement, id::InvoiceId,
    transaction::TransactionRecord,
};

/// Persistent store of transaction records, one per invoice.
pub trait TransactionStore: Send + Sync {
    /// Open a unit of work holding the exclusive lock for `invoice_id`.
    /// Concurrent callers for the same invoice wait here until the holder
    /// commits or drops its unit.
    fn begin(&self, invoice_id: InvoiceId) -> BoxFuture<'_, Box<dyn StoreUnit>>;
}

/// A locked read-modify-write sequence on one invoice's record. Dropping
/// the unit without committing persists nothing.
pub trait StoreUnit: Send {
    /// Record as it was when the lock was taken.
    fn current(&self) -> Option<&TransactionRecord>;

    /// Insert or update `record`, append `audit` and apply `settlement`,
    /// atomically.
    fn commit(
        self: Box<Self>,
        record: TransactionRecord,
        audit: NewAuditEntry,
        settlement: Option<Settlement>,
    ) -> BoxFuture<'static, ()>;
}
