// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, upstream client, and start HTTP server

mod config;
mod errors;
mod handlers;
mod models;
mod services;

#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use services::UnsplashClient;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        // Use configured log level or default
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    // A missing credential is fatal at startup, not on the first request
    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting image service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize Unsplash client (shared, read-only)
    let unsplash = match UnsplashClient::from_config(&config) {
        Ok(client) => {
            log::info!("Unsplash API: {}", client.base_url());
            web::Data::new(client)
        }
        Err(e) => {
            log::error!("Failed to initialize Unsplash client: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let allowed_origins = config.allowed_origins();

    HttpServer::new(move || {
        App::new()
            // Application state (upstream client)
            .app_data(unsplash.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(cors(allowed_origins.as_deref()))
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::images_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}

/// Build CORS middleware; `None` allows any origin
fn cors(allowed_origins: Option<&[String]>) -> Cors {
    match allowed_origins {
        None => Cors::permissive(),
        Some(origins) => origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600),
    }
}
