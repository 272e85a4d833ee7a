//! Configuration management for the contact application.
//!
//! This module handles loading and validating configuration from environment
//! variables. A `.env` file is loaded first if present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::{SocketAddr, ToSocketAddrs};

/// Configuration for the contact API server and its client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Contact store location (SQLite path, `sqlite://` prefix allowed)
    pub database_url: String,

    /// Address the API binds to (default: "0.0.0.0")
    pub host: String,

    /// Port the API listens on (default: 3000)
    pub port: u16,

    /// Base URL the client uses to reach the API
    pub api_base_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Contacts per page in the list view (default: 5)
    pub page_size: usize,

    /// Search input quiet period in milliseconds (default: 300)
    pub search_debounce_ms: u64,

    /// Log level used when RUST_LOG is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `DATABASE_URL`: contact store path (default: `contact_app.db`)
    /// - `HOST`: bind address (default: `0.0.0.0`)
    /// - `PORT`: bind port (default: 3000)
    /// - `CONTACT_API_URL`: API base URL for the client (default: `http://localhost:3000`)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `PAGE_SIZE`: contacts per page (default: 5)
    /// - `SEARCH_DEBOUNCE_MS`: search quiet period (default: 300)
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);
        if database_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "DATABASE_URL".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = Self::parse_env_u16("PORT", defaults.port)?;

        let api_base_url = env::var("CONTACT_API_URL").unwrap_or(defaults.api_base_url);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "CONTACT_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", defaults.request_timeout)?;
        let page_size = Self::parse_env_usize("PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PAGE_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let search_debounce_ms =
            Self::parse_env_u64("SEARCH_DEBOUNCE_MS", defaults.search_debounce_ms)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            database_url,
            host,
            port,
            api_base_url,
            request_timeout,
            page_size,
            search_debounce_ms,
            log_level,
        })
    }

    /// The filesystem path of the contact store.
    pub fn database_path(&self) -> &str {
        self.database_url
            .strip_prefix("sqlite://")
            .unwrap_or(&self.database_url)
    }

    /// The socket address the API binds to.
    ///
    /// `HOST` may be an IP literal or a host name; names resolve to their
    /// first address.
    pub fn bind_addr(&self) -> ConfigResult<SocketAddr> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            var: "HOST".to_string(),
            reason,
        };

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(format!("Cannot resolve bind address {}: {}", self.host, e)))?
            .next()
            .ok_or_else(|| invalid(format!("No address found for {}", self.host)))
    }

    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a port number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "contact_app.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_base_url: "http://localhost:3000".to_string(),
            request_timeout: 10,
            page_size: 5,
            search_debounce_ms: 300,
            log_level: "info".to_string(),
        }
    }
}
