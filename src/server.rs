//! Server module for managing HTTP server lifecycle
//!
//! This module handles storage initialization, startup, and graceful shutdown.

use std::time::Duration;

use anyhow::Context;
use axum::http::StatusCode;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;

use crate::api::routes::create_router;
use crate::config::{Environment, ServerConfig, Settings, StorageBackend};
use crate::db::{MigrationMode, establish_async_connection_pool, run_migrations};
use crate::repositories::Repositories;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal arrives.
    ///
    /// # Errors
    /// - Database connection pool or migration errors (postgres backend)
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env(),
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            request_timeout = %self.settings.server.request_timeout,
            storage = %self.settings.storage.backend,
            "Server configuration loaded"
        );

        let repos = self.repositories().await?;
        let state = AppState::new(repos, &self.settings);
        tracing::info!("Application state created");

        let router = create_router(state).layer(timeout_layer(&self.settings.server));

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    async fn repositories(&self) -> anyhow::Result<Repositories> {
        match self.settings.storage.backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; records are lost on shutdown");
                Ok(Repositories::in_memory())
            }
            StorageBackend::Postgres => {
                let database = &self.settings.database;
                tracing::info!(
                    max_connections = %database.max_connections,
                    min_connections = %database.min_connections,
                    connection_timeout = %database.connection_timeout,
                    "Database configuration loaded"
                );

                if database.auto_migrate {
                    let applied = run_migrations(&database.url, MigrationMode::Apply)
                        .await
                        .context("Failed to apply database migrations")?;
                    tracing::info!(applied = applied.len(), "Database migrations applied");
                }

                let pool = establish_async_connection_pool(database)
                    .await
                    .context("Failed to initialize database connection pool")?;
                tracing::info!("Database connection pool initialized");

                Ok(Repositories::postgres(pool))
            }
        }
    }
}

/// Answers `408 Request Timeout` once a request outlives `request_timeout`.
fn timeout_layer(config: &ServerConfig) -> TimeoutLayer {
    TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.request_timeout),
    )
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
