// src/config/client.rs
// DOCUMENTATION: Outbound HTTP client initialization
// PURPOSE: Build the shared reqwest client used for Unsplash calls

use crate::config::Config;
use reqwest::Client;
use std::time::Duration;

/// Initialize the outbound HTTP client
/// DOCUMENTATION: Called once during application startup in main.rs.
/// Timeouts are explicit so a stalled upstream cannot hold a worker forever.
pub fn init_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    log::info!(
        "Initializing HTTP client for {} (timeout {}s, connect {}s)",
        config.unsplash_api_url,
        config.upstream_timeout_secs,
        config.upstream_connect_timeout_secs
    );

    Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .connect_timeout(Duration::from_secs(config.upstream_connect_timeout_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
