// src/handlers/health.rs
// DOCUMENTATION: Health check and service info handlers
// PURPOSE: Simple endpoints to verify service status

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::SizeKeyword;

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /
/// Service description and endpoint index
pub async fn service_info() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": "image service",
        "description": "Fetch stock images from Unsplash API",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "formats": SizeKeyword::ALL,
        "endpoints": {
            "images": "/images",
            "health": "/health"
        }
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(service_info))
        .route("/health", web::get().to(health_check));
}
