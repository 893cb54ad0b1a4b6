//! # api-adapters
//!
//! The HTTP boundary: DTO projections plus, behind `web-axum`, the router
//! that maps each endpoint onto one service call.

pub mod dto;

#[cfg(feature = "web-axum")]
pub mod web;
