//! # Askbase Shared Library
//!
//! This crate contains the domain types, persistence layer and business rules
//! used by the askbase API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models and data structures
//! - `db`: Connection pool and migrations
//! - `store`: Repository traits with PostgreSQL and in-memory backends
//! - `auth`: Token validation, request identity and privilege checks
//! - `reputation`: Reputation adjustment on delete/undelete
//! - `render`: Markdown rendering and HTML scrubbing

pub mod auth;
pub mod db;
pub mod models;
pub mod render;
pub mod reputation;
pub mod store;

/// Current version of the askbase shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
