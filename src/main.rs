use {
    sqlx::postgres::PgPoolOptions,
    std::{sync::Arc, time::Duration},
    tokio::signal,
    tower_http::timeout::TimeoutLayer,
    tripay_sync::{
        AppState,
        adapters::{routes::build_router, tripay_client::TripayClient},
        config::Settings,
        infra::postgres::{billing_repo::PgBillingHost, transaction_repo::PgTransactionStore},
        services::{
            callback_verifier::CallbackVerifier, checkout::CheckoutService, reconciler::Reconciler,
        },
    },
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env().expect("invalid Tripay configuration");
    let database_url = settings
        .database_url
        .clone()
        .expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&database_url)
        .await
        .expect("failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let gateway = TripayClient::new(
        &settings.credentials,
        settings.base_url.as_deref(),
        settings.http_timeout,
        settings.logging_enabled,
    )
    .expect("failed to build Tripay client");
    tracing::info!(
        base_url = gateway.base_url(),
        sandbox = settings.credentials.sandbox_mode(),
        "Tripay gateway configured"
    );

    let host = Arc::new(PgBillingHost::new(pool.clone(), settings.app_url.clone()));
    let store = Arc::new(PgTransactionStore::new(pool));

    let state = AppState {
        verifier: CallbackVerifier::new(
            settings.credentials.private_key(),
            settings.logging_enabled,
        ),
        reconciler: Arc::new(Reconciler::new(
            store,
            host.clone(),
            settings.gateway_id,
            settings.logging_enabled,
        )),
        checkout: Arc::new(CheckoutService::new(
            host,
            Arc::new(gateway),
            settings.credentials.clone(),
            settings.gateway_id,
            settings.logging_enabled,
        )),
    };

    // Outbound gateway calls are bounded by the client timeout; this caps
    // the whole request including database work.
    let app = build_router(state).layer(TimeoutLayer::new(
        settings.http_timeout + Duration::from_secs(15),
    ));

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .expect("failed to bind listener");
    tracing::info!("listening on {}", settings.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
