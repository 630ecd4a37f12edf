//! Backend Module
//!
//! Server-side code for the tincan messaging application: an Axum HTTP
//! server exposing the REST API and the WebSocket push channel.
//!
//! # Architecture
//!
//! - **`server`** - initialization, configuration, shared state
//! - **`routes`** - route table and router assembly
//! - **`auth`** - accounts, sessions, account handlers
//! - **`messaging`** - message persistence, status lifecycle, handlers
//! - **`presence`** - push channel registry and WebSocket endpoint
//! - **`middleware`** - session-cookie authentication gate
//! - **`error`** - error taxonomy and response conversion
//!
//! # State Management
//!
//! `AppState` carries the optional database pool and the presence
//! registry. Both are cheaply clonable and shared across all request
//! handlers and socket tasks; there are no other process-wide mutables.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Message service
pub mod messaging;

/// Push channel and presence map
pub mod presence;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::ApiError;
pub use presence::PresenceRegistry;
pub use server::{create_app, AppState};
