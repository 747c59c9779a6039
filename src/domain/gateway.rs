use super::{
    BoxFuture,
    checkout::{TransactionCreateRequest, TransactionCreateResult},
};

/// Outbound side of the payment gateway.
pub trait PaymentGateway: Send + Sync {
    /// One attempt, no retry. Fails with `GatewayUnreachable`,
    /// `GatewayProtocol` or `GatewayRejected`.
    fn create_transaction<'a>(
        &'a self,
        request: &'a TransactionCreateRequest,
    ) -> BoxFuture<'a, TransactionCreateResult>;
}
