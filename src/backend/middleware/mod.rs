//! Middleware Module
//!
//! Request-processing middleware for the HTTP server.

/// Authentication middleware and the `AuthUser` extractor
pub mod auth;

pub use auth::{auth_middleware, AuthUser};
