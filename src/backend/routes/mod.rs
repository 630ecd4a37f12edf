//! Routes Module
//!
//! Route configuration for the HTTP server.

/// REST API route table
pub mod api_routes;

/// Router assembly
pub mod router;

pub use router::create_router;
