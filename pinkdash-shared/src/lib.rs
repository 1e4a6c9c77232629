//! # PinkDash Shared Library
//!
//! This crate contains the authentication core and collaborator boundaries
//! shared by the PinkDash dashboard API server.
//!
//! ## Module Organization
//!
//! - `auth`: Credential hashing, session token codec, cookie contract
//! - `store`: User store collaborator boundary and in-memory implementation

pub mod auth;
pub mod store;

/// Current version of the PinkDash shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
