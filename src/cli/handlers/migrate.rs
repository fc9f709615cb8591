//! Migrate command handler
//!
//! Applies, previews or reverts the embedded schema migrations. Only
//! meaningful for the postgres storage backend.

use crate::config::{Settings, StorageBackend};
use crate::db::{MigrationMode, run_migrations};
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// # Errors
    /// - `Validation` when the storage backend is not postgres
    /// - Database connection and migration errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if self.config.storage.backend != StorageBackend::Postgres {
            return Err(AppError::Validation {
                field: "storage.backend".to_string(),
                reason: format!(
                    "Migrations require the postgres backend, configured backend is '{}'",
                    self.config.storage.backend
                ),
            });
        }
        self.config.database.validate()?;

        let mode = match (dry_run, rollback) {
            (true, _) => MigrationMode::Pending,
            (false, Some(steps)) => MigrationMode::Revert(steps),
            (false, None) => MigrationMode::Apply,
        };

        let versions = run_migrations(&self.config.database.url, mode).await?;
        report(mode, &versions);
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

fn report(mode: MigrationMode, versions: &[String]) {
    match mode {
        MigrationMode::Pending if versions.is_empty() => {
            println!("✓ No pending migrations found - database is up to date");
        }
        MigrationMode::Pending => {
            println!("Found {} pending migration(s):", versions.len());
            for version in versions {
                println!("  - {version}");
            }
            println!("\nRun without --dry-run to apply these migrations");
        }
        MigrationMode::Apply if versions.is_empty() => {
            println!("✓ No migrations to apply - database is already up to date");
        }
        MigrationMode::Apply => {
            println!("✓ Applied {} migration(s):", versions.len());
            for version in versions {
                println!("  - {version}");
            }
        }
        MigrationMode::Revert(_) => {
            println!("✓ Rolled back {} migration(s):", versions.len());
            for version in versions {
                println!("  - {version}");
            }
        }
    }
}
