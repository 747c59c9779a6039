use super::{
    BoxFuture,
    id::InvoiceId,
    money::{Currency, Money, MoneyAmount},
};

/// Invoice fields the gateway integration reads from the billing host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub hash: String,
    pub client_id: i64,
    pub currency: Currency,
    pub buyer_first_name: String,
    pub buyer_last_name: String,
    pub buyer_email: String,
    pub buyer_phone: Option<String>,
}

impl Invoice {
    pub fn buyer_name(&self) -> String {
        format!("{} {}", self.buyer_first_name, self.buyer_last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceItem {
    pub title: String,
    pub price: MoneyAmount,
    pub quantity: Option<i64>,
}

/// Host-side effects of the first PAID for an invoice: credit the client's
/// balance and mark the invoice paid. Applied by the store inside the same
/// unit of work that records the settlement, so they land together or not
/// at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub invoice_id: InvoiceId,
    pub client_id: i64,
    pub amount: Money,
    /// Shown on the client's balance entry.
    pub description: String,
}

/// Read side of the billing platform this gateway plugs into. Its
/// invoices, taxes and URLs are taken as correct.
pub trait BillingHost: Send + Sync {
    fn invoice(&self, id: InvoiceId) -> BoxFuture<'_, Invoice>;

    fn invoice_items(&self, id: InvoiceId) -> BoxFuture<'_, Vec<InvoiceItem>>;

    fn total_with_tax<'a>(&'a self, invoice: &'a Invoice) -> BoxFuture<'a, MoneyAmount>;

    /// Where the payer lands after leaving the gateway checkout page.
    fn return_url(&self, invoice: &Invoice, gateway_id: i64) -> String;
}
