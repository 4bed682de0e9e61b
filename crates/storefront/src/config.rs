//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CARTSIDE_HOST` - Bind address (default: 127.0.0.1)
//! - `CARTSIDE_PORT` - Listen port (default: 3000)
//! - `CARTSIDE_DATA_DIR` - Directory holding the persisted cart document
//!   (default: data)
//! - `CARTSIDE_CONTENT_DIR` - Directory holding the demo product catalog
//!   (default: crates/storefront/content)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the persisted cart document
    pub data_dir: PathBuf,
    /// Directory holding the demo product catalog
    pub content_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CARTSIDE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CARTSIDE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CARTSIDE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CARTSIDE_PORT".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("CARTSIDE_DATA_DIR", "data"));
        let content_dir = PathBuf::from(get_env_or_default(
            "CARTSIDE_CONTENT_DIR",
            "crates/storefront/content",
        ));

        Ok(Self {
            host,
            port,
            data_dir,
            content_dir,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
