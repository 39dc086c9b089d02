// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod image_service;
pub mod link_resolver;
pub mod unsplash_client;

pub use image_service::*;
pub use unsplash_client::*;
