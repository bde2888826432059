//! # Askbase API Server Library
//!
//! HTTP handlers for the askbase Q&A service: question listing and display,
//! and the authenticated answer lifecycle (create, edit, delete, undelete).
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `response`: Flash redirects and answer forms
//! - `middleware`: Security headers
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
pub mod routes;
