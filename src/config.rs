//! Configuration management for the API key service.
//!
//! Configuration is read from a TOML file and may be overridden through
//! environment variables such as `APIKEY_AUTH__SERVER__PORT=9000`.

use crate::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "APIKEY_AUTH";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port number
    #[serde(default = "default_port")]
    pub port: u16,

    /// Worker thread count (actix-web picks one per core when unset)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Log each HTTP request through `TracingLogger`
    #[serde(default = "default_true")]
    pub enable_request_logging: bool,
}

/// Log format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

// Default value functions
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            workers: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            enable_request_logging: default_true(),
        }
    }
}

impl ServerConfig {
    /// Address string passed to the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Config {
    /// Load configuration from a file, applying environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let path = path.as_ref();

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).format(::config::FileFormat::Toml))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .map_err(|e| {
                ServiceError::config(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        settings
            .try_deserialize()
            .map_err(|e| ServiceError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: impl AsRef<Path>) -> ServiceResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ServiceError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ServiceError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ServiceResult<()> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ServiceError::config("Bind address must not be empty"));
        }

        if self.server.port == 0 {
            return Err(ServiceError::config("Port must be non-zero"));
        }

        if self.server.workers == Some(0) {
            return Err(ServiceError::config("Worker count must be at least 1"));
        }

        // Same directive syntax `init_logging` accepts, e.g. `apikey_auth=debug,warn`
        tracing_subscriber::EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ServiceError::config(format!(
                "Invalid log level '{}': {}",
                self.logging.level, e
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests that call `from_file` read the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_round_trip() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("apikey-auth.toml");

        let mut config = Config::default();
        config.server.port = 9191;
        config.server.workers = Some(2);
        config.logging.format = LogFormat::Json;
        config.logging.enable_request_logging = false;
        config.to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("enable_request_logging = false"));

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 9191);
        assert_eq!(loaded.server.workers, Some(2));
        assert_eq!(loaded.logging.format, LogFormat::Json);
        assert!(!loaded.logging.enable_request_logging);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partial.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.server.bind_address, "127.0.0.1");
        assert!(loaded.logging.enable_request_logging);
    }

    #[test]
    fn test_request_logging_can_be_disabled() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quiet.toml");
        std::fs::write(&path, "[logging]\nenable_request_logging = false\n").unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert!(!loaded.logging.enable_request_logging);
        assert_eq!(loaded.logging.level, "info");
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("env.toml");
        std::fs::write(&path, "[server]\nport = 7000\nworkers = 2\n").unwrap();

        std::env::set_var("APIKEY_AUTH__SERVER__WORKERS", "6");
        let loaded = Config::from_file(&path);
        std::env::remove_var("APIKEY_AUTH__SERVER__WORKERS");

        let loaded = loaded.unwrap();
        assert_eq!(loaded.server.workers, Some(6));
        assert_eq!(loaded.server.port, 7000);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let temp_dir = TempDir::new().unwrap();
        let result = Config::from_file(temp_dir.path().join("absent.toml"));

        assert!(matches!(result, Err(ServiceError::Config(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.bind_address = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.workers = Some(0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "apikey_auth=loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_filter_directives() {
        for level in ["warn", "WARN", "apikey_auth=debug", "apikey_auth=debug,actix_web=warn"] {
            let mut config = Config::default();
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok(), "level {level:?}");
        }
    }
}
