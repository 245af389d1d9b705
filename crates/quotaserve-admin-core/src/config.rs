//! Server configuration.
//!
//! All configuration is driven by environment variables.

use std::env;

/// Configuration for the quotaserve server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address for the admin listener.
    pub admin_listen: String,
    /// Path to the text configuration file. When absent the server starts
    /// with an empty configuration.
    pub config_file: Option<String>,
    /// Directory holding console templates. When absent no UI is served.
    pub assets_dir: Option<String>,
    /// Log level filter.
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            admin_listen: env::var("ADMIN_LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_owned()),
            config_file: env::var("CONFIG_FILE").ok().filter(|v| !v.is_empty()),
            assets_dir: env::var("ASSETS_DIR").ok().filter(|v| !v.is_empty()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            admin_listen: "0.0.0.0:8080".to_owned(),
            config_file: None,
            assets_dir: None,
            log_level: "info".to_owned(),
        }
    }
}
