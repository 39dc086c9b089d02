// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod health;
pub mod images;

pub use health::config as health_config;
pub use images::config as images_config;
