use {super::id::InvoiceId, uuid::Uuid};

#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub invoice_id: InvoiceId,
    pub action: String,
    pub actor: String,
    pub detail: serde_json::Value,
}
