//! # services
//!
//! Orchestration layer: each public method is one all-or-nothing unit of
//! work composed from the entity model and the repository ports.

pub mod board_service;
pub mod commands;
pub mod tags;
pub mod user_service;

pub use board_service::BoardService;
pub use user_service::UserService;
