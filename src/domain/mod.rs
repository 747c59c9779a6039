pub mod audit;
pub mod callback;
pub mod checkout;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod host;
pub mod id;
pub mod money;
pub mod signature;
pub mod store;
pub mod transaction;

use std::{future::Future, pin::Pin};

/// Boxed future returned by the collaborator traits.
pub type BoxFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, error::TripayError>> + Send + 'a>>;
