//! # Encore Booking API
//!
//! HTTP server for the public booking flow.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Booking API Server                               │
//! │                                                                         │
//! │  Browser ───► HTTP (8080) ───► Routes ───► CheckoutService ───► SQLite  │
//! │                                                │                        │
//! │                                                ▼                        │
//! │                                    encore-core reconciliation           │
//! │                                    (pure: prices, promotion, totals)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod extract;
mod routes;
mod service;
mod state;

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use encore_db::{Database, DbConfig};

use crate::config::ApiConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Encore Booking API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        db_path = %config.database_path,
        promotion_tiers = config.promotions.rules().len(),
        "Configuration loaded"
    );

    // Connect to database (runs migrations)
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Connected to SQLite");

    // Create shared state
    let state = AppState::new(db, config.promotions.clone());

    // Build router
    let app = routes::router(state);

    // Start server
    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
