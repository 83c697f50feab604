// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod place_service;
pub mod seed_service;

pub use place_service::*;
pub use seed_service::*;
