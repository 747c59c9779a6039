pub mod callback_verifier;
pub mod checkout;
pub mod reconciler;
