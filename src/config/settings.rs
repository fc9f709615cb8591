//! Configuration settings structures for catalog-admin
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables. Every field has a default, so an
//! empty `default.toml` yields a runnable in-memory console.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::LoggerConfig;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "catalog-admin".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_flash_ttl() -> u64 {
    300
}

fn default_image_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif"]
        .into_iter()
        .map(String::from)
        .collect()
}

// ============================================================================
// Application Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

// ============================================================================
// Storage Configuration
// ============================================================================

/// Where catalog records live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; contents are lost on restart.
    #[default]
    Memory,
    /// PostgreSQL through the `[database]` pool.
    Postgres,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Postgres => "postgres",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            _ => Err(ConfigError::validation(
                "storage.backend".to_string(),
                format!("Unknown storage backend '{s}'. Valid values are: memory, postgres"),
            )),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of idle connections kept in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Run pending migrations when the server starts
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// Flash and Upload Configuration
// ============================================================================

/// One-shot redirect messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashConfig {
    /// Seconds an unread message is kept before it is purged
    #[serde(default = "default_flash_ttl")]
    pub ttl_seconds: u64,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_flash_ttl(),
        }
    }
}

/// Product image rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Accepted image file extensions, compared case-insensitively
    #[serde(default = "default_image_extensions")]
    pub allowed_image_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_image_extensions: default_image_extensions(),
        }
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Only consulted when `storage.backend = "postgres"`
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logger: LoggerConfig,

    #[serde(default)]
    pub flash: FlashConfig,

    #[serde(default)]
    pub upload: UploadConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_config_defaults() {
        let config = ApplicationConfig::default();
        assert_eq!(config.name, "catalog-admin");
        assert_eq!(config.version, crate::pkg_version());
    }

    #[test]
    fn test_server_config_address() {
        let config = ServerConfig::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_storage_defaults_to_memory() {
        assert_eq!(Settings::default().storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!("Postgres".parse::<StorageBackend>().unwrap(), StorageBackend::Postgres);
        assert_eq!("memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_upload_defaults() {
        let config = UploadConfig::default();
        assert_eq!(config.allowed_image_extensions, vec!["jpg", "jpeg", "png", "gif"]);
    }

    #[test]
    fn test_settings_serialize_to_json() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["storage"]["backend"], "memory");
        assert_eq!(json["flash"]["ttl_seconds"], 300);
    }
}
