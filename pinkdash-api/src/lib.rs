//! # PinkDash API Server Library
//!
//! This library provides the core functionality for the PinkDash dashboard
//! API server.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `gate`: Session gate middleware for protected routes
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod gate;
pub mod routes;
