//! # CLI Server
//!
//! Server startup and shutdown for the reviewer CLI.

use std::{net::SocketAddr, time::Duration};

use anyhow::anyhow;
use error::Result;
use migration::{DatabaseConfig, Migrator, MigratorTrait as _};
use server::{create_app_router, AppState, ServerResult};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{commands::ServeArgs, config::parse_socket_addr};

/// Starts the API server
///
/// Connects to the database, applies pending migrations, then serves HTTP until Ctrl+C or SIGTERM.
///
/// # Arguments
///
/// * `config` - Database configuration
/// * `args` - Serve command arguments
///
/// # Returns
///
/// A `Result` indicating success or failure.
pub async fn serve(config: &DatabaseConfig, args: &ServeArgs) -> Result<()> {
    info!(target: "serve", "Starting API server...");

    info!(target: "serve", database = %config.redacted_url(), "Connecting to database...");
    let db = config.connect().await?;

    info!(target: "serve", "Running database migrations...");
    Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow!("Failed to run database migrations: {}", e))?;
    info!(
        target: "serve",
        "Database migrations completed successfully"
    );

    let state = AppState::new(db, Duration::from_secs(args.request_timeout_secs));
    let app = create_app_router(state.clone());

    let address = parse_socket_addr(&args.host, args.port)
        .map_err(|e| anyhow!("Invalid address {}:{}: {}", args.host, args.port, e))?;

    serve_http(&app, &address).await?;

    info!(
        target: "serve",
        uptime_secs = %state.start_time.elapsed().as_secs(),
        "Server stopped"
    );
    state.db.close().await?;
    Ok(())
}

/// Serves the application over HTTP
async fn serve_http(app: &axum::Router, address: &SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {}: {}", address, e))?;

    let bound = listener.local_addr()?;
    let started = ServerResult::new(&bound.to_string());
    info!(
        target: "serve",
        address = %started.address,
        started_at = %started.started_at,
        "Starting HTTP server..."
    );

    axum::serve(
        listener,
        app.clone()
            .into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| anyhow!("HTTP server error: {}", e))?;
    Ok(())
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM)
///
/// A handler that cannot be installed is logged and never fires; the other one still can.
#[allow(
    clippy::integer_division_remainder_used,
    reason = "tokio::select! macro triggers false positive"
)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(target: "serve", error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!(target: "serve", error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!(target: "serve", "Received shutdown signal, draining connections...");
}
