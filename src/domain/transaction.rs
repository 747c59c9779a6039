use {
    super::audit::NewAuditEntry,
    super::error::TripayError,
    super::id::InvoiceId,
    super::money::{Currency, Money, MoneyAmount},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::fmt,
    uuid::Uuid,
};

/// Internal state of a gateway transaction, as stored on the host record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Complete,
    Expired,
    Failed,
    Refunded,
    Unknown,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Complete => "complete",
            Self::Expired => "expired",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TransactionStatus {
    type Error = TripayError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "complete" => Ok(Self::Complete),
            "expired" => Ok(Self::Expired),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            "unknown" => Ok(Self::Unknown),
            other => Err(TripayError::Validation(format!(
                "unknown transaction status: {other}"
            ))),
        }
    }
}

/// Payment status as reported by the gateway. Tokens are matched exactly;
/// anything else is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallbackStatus {
    Paid,
    Expired,
    Unpaid,
    Failed,
    Refund,
    Other(String),
}

impl CallbackStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "PAID",
            Self::Expired => "EXPIRED",
            Self::Unpaid => "UNPAID",
            Self::Failed => "FAILED",
            Self::Refund => "REFUND",
            Self::Other(s) => s,
        }
    }

    /// Where a callback with this status takes the record.
    pub fn transition(&self) -> StatusTransition {
        match self {
            Self::Paid => StatusTransition {
                status: TransactionStatus::Complete,
                error_note: None,
                settles: true,
            },
            Self::Expired => StatusTransition::noted(
                TransactionStatus::Expired,
                "Tripay payment expired".into(),
            ),
            Self::Unpaid => StatusTransition {
                status: TransactionStatus::Pending,
                error_note: None,
                settles: false,
            },
            Self::Failed => StatusTransition::noted(
                TransactionStatus::Failed,
                "Tripay payment failed".into(),
            ),
            Self::Refund => StatusTransition::noted(
                TransactionStatus::Refunded,
                "Tripay payment refunded".into(),
            ),
            Self::Other(s) => StatusTransition::noted(
                TransactionStatus::Unknown,
                format!("Unknown Tripay payment status: {s}"),
            ),
        }
    }
}

impl From<String> for CallbackStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PAID" => Self::Paid,
            "EXPIRED" => Self::Expired,
            "UNPAID" => Self::Unpaid,
            "FAILED" => Self::Failed,
            "REFUND" => Self::Refund,
            _ => Self::Other(s),
        }
    }
}

impl From<CallbackStatus> for String {
    fn from(s: CallbackStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for CallbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub status: TransactionStatus,
    pub error_note: Option<String>,
    /// Reaching this state requires settling the invoice first.
    pub settles: bool,
}

impl StatusTransition {
    fn noted(status: TransactionStatus, note: String) -> Self {
        Self {
            status,
            error_note: Some(note),
            settles: false,
        }
    }
}

/// Transaction record kept per invoice. Created on first callback, updated
/// in place afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub invoice_id: InvoiceId,
    pub gateway_id: i64,
    pub merchant_ref: Option<String>,
    pub status: Option<TransactionStatus>,
    pub txn_id: Option<String>,
    pub amount: Option<MoneyAmount>,
    pub currency: Option<Currency>,
    pub error: Option<String>,
    pub payment_method: Option<String>,
    /// Set once funds were credited and the invoice marked paid. Never cleared.
    pub settled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Fresh record for an invoice seen for the first time. No status yet.
    pub fn new(invoice_id: InvoiceId, gateway_id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            invoice_id,
            gateway_id,
            merchant_ref: None,
            status: None,
            txn_id: None,
            amount: None,
            currency: None,
            error: None,
            payment_method: None,
            settled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled_at.is_some()
    }

    pub fn status_str(&self) -> Option<&'static str> {
        self.status.as_ref().map(TransactionStatus::as_str)
    }

    pub fn apply_settlement(
        &mut self,
        money: Money,
        reference: Option<String>,
        now: DateTime<Utc>,
    ) {
        self.status = Some(TransactionStatus::Complete);
        self.txn_id = reference;
        self.amount = Some(money.amount());
        self.currency = Some(money.currency().clone());
        self.error = None;
        self.settled_at = Some(now);
    }

    pub fn audit_entry(&self, actor: &str, action: &str, detail: serde_json::Value) -> NewAuditEntry {
        NewAuditEntry {
            id: Uuid::now_v7(),
            entity_type: "transaction".to_string(),
            entity_id: self.id,
            invoice_id: self.invoice_id,
            action: action.to_string(),
            actor: actor.to_string(),
            detail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// First callback for this invoice; record inserted.
    Created,
    /// Existing record moved to the mapped status.
    Updated,
    /// PAID applied: funds credited, invoice marked paid.
    Settled,
    /// PAID for an invoice that was already settled. No side effects.
    AlreadySettled,
    /// Status would regress a settled record; only `updated_at` changed.
    Anomaly,
}

impl ReconcileOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Settled => "settled",
            Self::AlreadySettled => "already_settled",
            Self::Anomaly => "anomaly",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub record: TransactionRecord,
    pub outcome: ReconcileOutcome,
}
