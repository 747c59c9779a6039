pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    services::{callback_verifier::CallbackVerifier, checkout::CheckoutService, reconciler::Reconciler},
    std::sync::Arc,
};

#[derive(Clone)]
pub struct AppState {
    pub verifier: CallbackVerifier,
    pub reconciler: Arc<Reconciler>,
    pub checkout: Arc<CheckoutService>,
}
