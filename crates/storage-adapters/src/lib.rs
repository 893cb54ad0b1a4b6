//! # storage-adapters
//!
//! Relational store implementations of the `domains` ports, selected by
//! compile-time features.

#[cfg(feature = "db-sqlite")]
pub mod sqlite;
