pub mod audit_repo;
pub mod billing_repo;
pub mod transaction_repo;
