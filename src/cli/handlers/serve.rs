//! Serve command handler
//!
//! Validates configuration, then either reports what would start (dry run)
//! or runs the HTTP server until shutdown.

use crate::config::{Settings, StorageBackend};
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config.clone()).run().await?;
        Ok(())
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Storage backend: {}", self.config.storage.backend);
        if self.config.storage.backend == StorageBackend::Postgres {
            println!(
                "✓ Database pool: {}-{} connections, auto_migrate = {}",
                self.config.database.min_connections,
                self.config.database.max_connections,
                self.config.database.auto_migrate
            );
        }
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_handler_dry_run() {
        let handler = ServeCommandHandler::new(Settings::default());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_invalid_config() {
        let mut config = Settings::default();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config);

        assert!(handler.execute(true).await.is_err());
    }
}
