//! Skubridge Server - Order webhook and scheduled sync jobs.
//!
//! This binary runs the always-on half of the sync:
//!
//! - Axum web server receiving Shopify order webhooks and relaying paid
//!   orders to the supplier
//! - Cron-scheduled catalog sync (twice daily) and stock sync (hourly)
//!   per configured store
//!
//! One-off operations (initial migration, maintenance) live in the cli
//! binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

use skubridge_sync::SyncConfig;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod routes;
mod scheduler;
mod state;

use state::AppState;

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "skubridge_server=info,skubridge_sync=info,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    // LOG_FORMAT=json switches to structured output for log shipping
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let config = SyncConfig::from_env().expect("Failed to load configuration");
    tracing::info!(
        stores = ?config.stores.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        "configuration loaded"
    );

    let state = AppState::new(config);

    let _scheduler = scheduler::start(&state)
        .await
        .expect("Failed to start job scheduler");
    tracing::info!("sync jobs scheduled");

    let app = routes::routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    tracing::info!("server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
