//! Karte link server — secure report-link subsystem for the Karte clinic
//! records platform.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use karte_core::config::AppConfig;
use karte_core::error::AppError;
use karte_core::traits::{Clock, SystemClock};
use karte_database::{DatabasePool, LinkStore, PgLinkStore};
use karte_service::LinkService;
use karte_worker::SweepScheduler;

#[tokio::main]
async fn main() {
    let env = std::env::var("KARTE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Karte link server v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    karte_database::migration::run_migrations(db.pool()).await?;

    // ── Step 2: Link service ─────────────────────────────────────
    let store = Arc::new(PgLinkStore::new(db.pool().clone())) as Arc<dyn LinkStore>;
    let clock = Arc::new(SystemClock) as Arc<dyn Clock>;
    let link_service = Arc::new(LinkService::new(store, clock, config.links.clone()));

    // ── Step 3: Expiry sweep ─────────────────────────────────────
    let mut scheduler = SweepScheduler::new().await?;
    scheduler
        .register_link_sweep(Arc::clone(&link_service), &config.links.sweep_schedule)
        .await?;
    scheduler.start().await?;

    // ── Step 4: HTTP server ──────────────────────────────────────
    let state = karte_api::AppState::new(Arc::new(config.clone()), link_service);
    let app = karte_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Karte link server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 5: Teardown ─────────────────────────────────────────
    scheduler.shutdown().await?;
    db.close().await;

    tracing::info!("Karte link server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
