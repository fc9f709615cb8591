//! Configuration loader for catalog-admin
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "CATALOG_CONFIG_DIR";

/// Environment variable for a single configuration file
const CONFIG_FILE_ENV: &str = "CATALOG_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "CATALOG";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `CATALOG_*` environment variables
///
/// When a single configuration file is selected, it replaces layers 1-3.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Creates a loader from `CATALOG_CONFIG_DIR`, `CATALOG_CONFIG_FILE` and
    /// `CATALOG_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both `CATALOG_CONFIG_DIR` and `CATALOG_CONFIG_FILE`
    /// are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "CATALOG_CONFIG_DIR and CATALOG_CONFIG_FILE cannot both be set. \
                 Use CATALOG_CONFIG_DIR for layered configuration or \
                 CATALOG_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loads only `path` (plus environment overrides).
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Selects the `{environment}.toml` layer.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources and validate it.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {e}"))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match &self.config_file {
            Some(config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // CATALOG_SERVER__PORT -> server.port
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("upload.allowed_image_extensions"),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::StorageBackend;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching process environment run one at a time.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores touched environment variables on drop.
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }

        fn clear_catalog_vars(&mut self) {
            let keys: Vec<String> = std::env::vars()
                .map(|(key, _)| key)
                .filter(|key| key.starts_with("CATALOG_"))
                .collect();
            for key in keys {
                self.remove(&key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_config_loader_defaults() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_catalog_vars();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_catalog_vars();
        env.set("CATALOG_CONFIG_DIR", "/custom/config");
        env.set("CATALOG_CONFIG_FILE", "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("CATALOG_CONFIG_DIR"));
                assert!(msg.contains("CATALOG_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_catalog_vars();
        let temp_dir = setup_config_dir(&[]);
        env.set("CATALOG_CONFIG_DIR", temp_dir.path().to_str().unwrap());

        match ConfigLoader::new().unwrap().load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_layers_apply_in_order() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_catalog_vars();
        let temp_dir = setup_config_dir(&[
            ("default.toml", "[server]\nport = 3000\nhost = \"0.0.0.0\"\n"),
            ("production.toml", "[server]\nport = 4000\n"),
            ("local.toml", "[flash]\nttl_seconds = 60\n"),
        ]);
        env.set("CATALOG_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.set("CATALOG_APP_ENV", "production");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.flash.ttl_seconds, 60);
        assert_eq!(settings.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_env_vars_override_files() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_catalog_vars();
        let temp_dir = setup_config_dir(&[("default.toml", "[server]\nport = 3000\n")]);
        env.set("CATALOG_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.set("CATALOG_SERVER__PORT", "9090");
        env.set("CATALOG_UPLOAD__ALLOWED_IMAGE_EXTENSIONS", "png,webp");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.upload.allowed_image_extensions, vec!["png", "webp"]);
    }

    #[test]
    fn test_single_file_mode_skips_layers() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_catalog_vars();
        let temp_dir = setup_config_dir(&[(
            "catalog.toml",
            "[storage]\nbackend = \"postgres\"\n[database]\nurl = \"postgres://localhost/catalog\"\n",
        )]);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_config_file(temp_dir.path().join("catalog.toml"))
            .load()
            .unwrap();
        assert_eq!(settings.storage.backend, StorageBackend::Postgres);
        assert_eq!(settings.database.url, "postgres://localhost/catalog");
    }

    #[test]
    fn test_postgres_without_url_fails_validation() {
        let _lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::new();
        env.clear_catalog_vars();
        let temp_dir = setup_config_dir(&[("default.toml", "[storage]\nbackend = \"postgres\"\n")]);
        env.set("CATALOG_CONFIG_DIR", temp_dir.path().to_str().unwrap());

        let result = ConfigLoader::new().unwrap().load();
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
