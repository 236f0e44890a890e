//! # Mission Control
//!
//! A REST service keeping records of scientists, the planets they study and
//! the missions that send one to the other.
//!
//! - **Scientists**: `/scientists`, `/scientists/{id}`
//! - **Planets**: `/planets`, `/planets/{id}`
//! - **Missions**: `/missions`, `/missions/{id}`
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Mission Control Service                      │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌────────────┐  │
//! │  │   API Layer │  │   Service   │  │   Storage   │  │  Domain    │  │
//! │  │  (Axum)     │→ │   Layer     │→ │  (sqlx)     │  │  Models    │  │
//! │  └─────────────┘  └─────────────┘  └─────────────┘  └────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::storage::create_storage;

/// Run the Mission Control service.
///
/// This function:
/// 1. Loads `.env` and configuration from files and environment
/// 2. Initializes logging and metrics
/// 3. Opens the database and applies migrations
/// 4. Starts the HTTP server
/// 5. Handles graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded
/// - The database cannot be opened or migrated
/// - HTTP server fails to bind
pub async fn run() -> anyhow::Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let config = AppConfig::load()?;

    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Mission Control"
    );

    let storage = create_storage(&config.database).await?;
    info!(backend = storage.backend_name(), "Database initialized");

    let mut state = AppState::new(Arc::new(config.clone()), Arc::clone(&storage));
    if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        state = state.with_metrics(handle);
    }

    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initialize logging based on configuration.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.log_format == "json" {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
