// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod image;
pub mod transform;

pub use image::*;
pub use transform::*;
