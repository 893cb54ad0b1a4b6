//! domains/src/lib.rs
//!
//! The entity model and port definitions for the board service.

pub mod errors;
pub mod models;
pub mod ports;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use ports::*;
