use {
    crate::{
        AppState,
        adapters::{checkout::checkout_handler, tripay_callback::callback_handler},
    },
    axum::{
        Router,
        extract::DefaultBodyLimit,
        routing::{get, post},
    },
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/callback/tripay", post(callback_handler))
        .route("/invoices/{id}/checkout", post(checkout_handler))
        .layer(DefaultBodyLimit::max(64 * 1024)) // callbacks are well under 2 KB
        .with_state(state)
}
