// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use thiserror::Error;

/// Startup configuration failures
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("UNSPLASH_ACCESS_KEY (or ACCESS_KEY) is required")]
    MissingAccessKey,

    #[error("UNSPLASH_API_URL must be an http(s) URL, got '{0}'")]
    InvalidApiUrl(String),

    #[error("{0} must be greater than zero")]
    InvalidTimeout(&'static str),
}

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup, never mutated afterwards
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8000)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Unsplash API access key, sent as `Client-ID`
    pub unsplash_access_key: String,

    /// Unsplash API base URL (no trailing slash)
    pub unsplash_api_url: String,

    /// Total timeout for one upstream request, in seconds
    pub upstream_timeout_secs: u64,

    /// Connect timeout for upstream requests, in seconds
    pub upstream_connect_timeout_secs: u64,

    /// Comma separated list of allowed CORS origins, or "*"
    pub cors_allowed_origins: String,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .unwrap_or(8000),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            unsplash_access_key: env::var("UNSPLASH_ACCESS_KEY")
                .or_else(|_| env::var("ACCESS_KEY"))
                .unwrap_or_default(),

            unsplash_api_url: env::var("UNSPLASH_API_URL")
                .unwrap_or_else(|_| "https://api.unsplash.com".to_string())
                .trim_end_matches('/')
                .to_string(),

            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            upstream_connect_timeout_secs: env::var("UPSTREAM_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely.
    /// A missing access key fails here rather than on the first request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unsplash_access_key.trim().is_empty() {
            return Err(ConfigError::MissingAccessKey);
        }

        if !(self.unsplash_api_url.starts_with("http://")
            || self.unsplash_api_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidApiUrl(self.unsplash_api_url.clone()));
        }

        if self.upstream_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("UPSTREAM_TIMEOUT_SECS"));
        }

        if self.upstream_connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("UPSTREAM_CONNECT_TIMEOUT_SECS"));
        }

        Ok(())
    }

    /// Parsed CORS origins; `None` means any origin is allowed
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_allowed_origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

#[cfg(test)]
pub fn test_config(api_url: &str) -> Config {
    Config {
        server_address: "127.0.0.1".to_string(),
        server_port: 0,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        unsplash_access_key: "test-key".to_string(),
        unsplash_api_url: api_url.to_string(),
        upstream_timeout_secs: 5,
        upstream_connect_timeout_secs: 2,
        cors_allowed_origins: "*".to_string(),
    }
}
