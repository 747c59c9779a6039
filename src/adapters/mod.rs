pub mod api_errors;
pub mod checkout;
pub mod routes;
pub mod tripay_callback;
pub mod tripay_client;
