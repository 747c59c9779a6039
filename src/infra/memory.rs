use {
    crate::domain::{
        BoxFuture,
        audit::NewAuditEntry,
        error::TripayError,
        host::Settlement,
        id::InvoiceId,
        store::{StoreUnit, TransactionStore},
        transaction::TransactionRecord,
    },
    std::{
        collections::HashMap,
        sync::{Arc, Mutex, MutexGuard, PoisonError},
    },
    tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard},
};

#[derive(Default)]
struct Ledger {
    records: HashMap<InvoiceId, TransactionRecord>,
    audit: Vec<NewAuditEntry>,
    settlements: Vec<Settlement>,
}

type SharedLedger = Arc<Mutex<Ledger>>;
type Locks = Arc<Mutex<HashMap<InvoiceId, Arc<AsyncMutex<()>>>>>;

/// Process-local transaction store. One async mutex per invoice gives the
/// same serialisation the Postgres advisory lock does. Settlements are kept
/// in the same ledger as the records and written under the same guard.
#[derive(Default)]
pub struct MemoryTransactionStore {
    ledger: SharedLedger,
    locks: Locks,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, invoice_id: InvoiceId) -> Option<TransactionRecord> {
        self.ledger().records.get(&invoice_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.ledger().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn audit_entries(&self, invoice_id: InvoiceId) -> Vec<NewAuditEntry> {
        self.ledger()
            .audit
            .iter()
            .filter(|e| e.invoice_id == invoice_id)
            .cloned()
            .collect()
    }

    /// Every settlement applied so far, in commit order.
    pub fn settlements(&self) -> Vec<Settlement> {
        self.ledger().settlements.clone()
    }

    /// Invoices with a lock entry, i.e. currently held or awaited.
    pub fn active_locks(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn lock_for(&self, invoice_id: InvoiceId) -> Arc<AsyncMutex<()>> {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(invoice_id)
            .or_default()
            .clone()
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn begin(&self, invoice_id: InvoiceId) -> BoxFuture<'_, Box<dyn StoreUnit>> {
        Box::pin(async move {
            let guard = self.lock_for(invoice_id).lock_owned().await;
            let unit: Box<dyn StoreUnit> = Box::new(MemoryUnit {
                invoice_id,
                guard: Some(guard),
                current: self.get(invoice_id),
                ledger: self.ledger.clone(),
                locks: self.locks.clone(),
            });
            Ok::<_, TripayError>(unit)
        })
    }
}

struct MemoryUnit {
    invoice_id: InvoiceId,
    guard: Option<OwnedMutexGuard<()>>,
    current: Option<TransactionRecord>,
    ledger: SharedLedger,
    locks: Locks,
}

impl StoreUnit for MemoryUnit {
    fn current(&self) -> Option<&TransactionRecord> {
        self.current.as_ref()
    }

    fn commit(
        self: Box<Self>,
        record: TransactionRecord,
        audit: NewAuditEntry,
        settlement: Option<Settlement>,
    ) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
            ledger.records.insert(record.invoice_id, record);
            ledger.audit.push(audit);
            ledger.settlements.extend(settlement);
            drop(ledger);
            drop(self);
            Ok::<_, TripayError>(())
        })
    }
}

impl Drop for MemoryUnit {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // The map and our guard account for two references; more means
        // another caller is waiting on this invoice.
        let idle = locks
            .get(&self.invoice_id)
            .is_some_and(|lock| Arc::strong_count(lock) <= 2);
        if idle {
            locks.remove(&self.invoice_id);
        }
        drop(locks);
        self.guard.take();
    }
}
