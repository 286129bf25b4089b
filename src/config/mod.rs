//! Configuration module for Courier
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`COURIER_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use courier::config::CourierConfig;
//!
//! // Load defaults
//! let config = CourierConfig::default();
//! assert_eq!(config.server.port, 3001);
//!
//! // Parse from TOML
//! let toml = r#"
//! [proxy]
//! timeout_seconds = 10
//! "#;
//! let config: CourierConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.proxy.timeout_seconds, 10);
//! ```

pub mod error;
pub mod logging;
pub mod proxy;
pub mod server;
pub mod store;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use proxy::ProxyConfig;
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Courier server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CourierConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Outbound proxy settings
    pub proxy: ProxyConfig,
    /// Backing key-value store
    pub store: StoreConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl CourierConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(Some(path))
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports COURIER_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("COURIER_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("COURIER_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("COURIER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("COURIER_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(backend) = std::env::var("COURIER_STORE_BACKEND") {
            if let Ok(b) = backend.parse() {
                self.store.backend = b;
            }
        }
        if let Ok(url) = std::env::var("COURIER_STORE_URL") {
            self.store.url = url;
        }

        if let Ok(timeout) = std::env::var("COURIER_PROXY_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.proxy.timeout_seconds = t;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.proxy.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "proxy.timeout_seconds".to_string(),
                message: "timeout must be at least one second".to_string(),
            });
        }

        if self.store.backend == StoreBackend::Redis && self.store.url.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "store.url".to_string(),
                message: "URL cannot be empty for the redis backend".to_string(),
            });
        }

        Ok(())
    }
}
