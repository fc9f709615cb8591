//! Async database connection pool implementation.
//!
//! Uses bb8 connection pool manager with diesel_async for PostgreSQL connections.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Async connection pool type alias.
///
/// bb8::Pool internally uses Arc, so Clone is cheap (just reference count increment).
pub type AsyncDbPool = Pool<AsyncPgConnection>;

/// Creates an async database connection pool sized by `config`.
///
/// # Errors
///
/// - `AppError::ConnectionPool` - If the pool cannot open its initial connections
pub async fn establish_async_connection_pool(config: &DatabaseConfig) -> AppResult<AsyncDbPool> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.url.as_str());

    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(config.min_connections))
        .connection_timeout(Duration::from_secs(config.connection_timeout))
        .build(manager)
        .await
        .map_err(|e| AppError::ConnectionPool {
            source: anyhow::anyhow!("Failed to build connection pool: {}", e),
        })
}

/// What a migration run should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationMode {
    /// Apply every pending migration.
    Apply,
    /// Only list pending migrations.
    Pending,
    /// Revert the given number of applied migrations.
    Revert(u32),
}

/// Runs migrations on a blocking connection and returns the affected
/// migration versions.
pub async fn run_migrations(url: &str, mode: MigrationMode) -> AppResult<Vec<String>> {
    if let MigrationMode::Revert(0) = mode {
        return Err(AppError::Validation {
            field: "rollback".to_string(),
            reason: "Number of rollback steps must be greater than 0".to_string(),
        });
    }

    let url = url.to_string();
    tokio::task::spawn_blocking(move || {
        use diesel::Connection;
        use diesel::pg::PgConnection;

        let mut conn = PgConnection::establish(&url).map_err(|e| AppError::Database {
            operation: "establish connection for migrations".to_string(),
            source: anyhow::anyhow!("Connection error: {}", e),
        })?;

        let migration_error = |operation: &str, e| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("Migration error: {}", e),
        };

        match mode {
            MigrationMode::Apply => conn
                .run_pending_migrations(MIGRATIONS)
                .map(|applied| applied.iter().map(ToString::to_string).collect())
                .map_err(|e| migration_error("run pending migrations", e)),
            MigrationMode::Pending => conn
                .pending_migrations(MIGRATIONS)
                .map(|pending| pending.iter().map(|m| m.name().to_string()).collect())
                .map_err(|e| migration_error("check pending migrations", e)),
            MigrationMode::Revert(steps) => {
                let applied = conn
                    .applied_migrations()
                    .map_err(|e| migration_error("get applied migrations", e))?;
                if applied.len() < steps as usize {
                    return Err(AppError::Validation {
                        field: "rollback".to_string(),
                        reason: format!(
                            "Cannot rollback {} migrations - only {} applied migrations available",
                            steps,
                            applied.len()
                        ),
                    });
                }

                let mut reverted = Vec::with_capacity(steps as usize);
                for _ in 0..steps {
                    let version = conn
                        .revert_last_migration(MIGRATIONS)
                        .map_err(|e| migration_error("revert migration", e))?;
                    reverted.push(version.to_string());
                }
                Ok(reverted)
            }
        }
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_step_revert_is_rejected_before_connecting() {
        let result = run_migrations("postgres://unused/never", MigrationMode::Revert(0)).await;

        match result {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback");
                assert!(reason.contains("greater than 0"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }
}
