// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export document store components

pub mod filter;
pub mod memory;
pub mod postgres;
pub mod store;

pub use filter::*;
pub use memory::*;
pub use postgres::*;
pub use store::*;
