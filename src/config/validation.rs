//! Configuration validation logic
//!
//! Each section checks its own values; [`Settings::validate`] runs them in
//! order and returns the first failure.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FlashConfig, ServerConfig, Settings, StorageBackend, UploadConfig,
};

impl ServerConfig {
    /// Port must be non-zero and the request timeout positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must not be empty and must use a PostgreSQL scheme
    /// - Max and min connections must be greater than 0
    /// - Min connections must not exceed max connections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required when storage.backend is postgres.",
            ));
        }

        if !(self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")) {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        Ok(())
    }
}

impl FlashConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_seconds == 0 {
            return Err(ConfigError::validation(
                "flash.ttl_seconds",
                "Flash message TTL must be greater than 0 seconds.",
            ));
        }
        Ok(())
    }
}

impl UploadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_image_extensions.is_empty() {
            return Err(ConfigError::validation(
                "upload.allowed_image_extensions",
                "At least one image extension must be allowed.",
            ));
        }

        if let Some(bad) = self
            .allowed_image_extensions
            .iter()
            .find(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(ConfigError::ValidationError {
                field: "upload.allowed_image_extensions".to_string(),
                message: format!("Invalid image extension '{bad}'."),
            });
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings.
    ///
    /// Database settings are only checked for the postgres backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;

        if self.storage.backend == StorageBackend::Postgres {
            self.database.validate()?;
        }

        self.logger
            .validate()
            .map_err(|e| ConfigError::validation("logger".to_string(), format!("{e:#}")))?;
        self.flash.validate()?;
        self.upload.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres_settings(url: &str) -> Settings {
        let mut settings = Settings::default();
        settings.storage.backend = StorageBackend::Postgres;
        settings.database.url = url.to_string();
        settings
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_server_config_invalid_port_zero() {
        let mut settings = Settings::default();
        settings.server.port = 0;

        match settings.validate() {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "server.port"),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_memory_backend_ignores_database() {
        let mut settings = Settings::default();
        settings.database.max_connections = 0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_postgres_backend_requires_url() {
        assert!(postgres_settings("").validate().is_err());
        assert!(postgres_settings("mysql://localhost/db").validate().is_err());
        assert!(postgres_settings("postgres://localhost/catalog").validate().is_ok());
    }

    #[test]
    fn test_database_min_exceeds_max() {
        let mut settings = postgres_settings("postgres://localhost/catalog");
        settings.database.min_connections = 20;

        match settings.validate() {
            Err(ConfigError::ValidationError { field, message }) => {
                assert_eq!(field, "database.min_connections");
                assert!(message.contains("20"));
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_logger_level() {
        let mut settings = Settings::default();
        settings.logger.level = "verbose".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_flash_ttl_zero_rejected() {
        let mut settings = Settings::default();
        settings.flash.ttl_seconds = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_upload_extensions_rejected_when_empty_or_blank() {
        let mut settings = Settings::default();
        settings.upload.allowed_image_extensions.clear();
        assert!(settings.validate().is_err());

        settings.upload.allowed_image_extensions = vec![".".into()];
        assert!(settings.validate().is_err());
    }
}
