//! Authentication Module
//!
//! User accounts, sessions, and the handlers behind `/api/auth`.
//!
//! # Architecture
//!
//! - **`users`** - account record and database operations
//! - **`sessions`** - JWT creation/validation and the session cookie
//! - **`handlers`** - HTTP handlers for the account endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: validate input → create unverified user → set cookie
//! 2. **Login**: verify credentials → set cookie
//! 3. **Protected routes**: middleware resolves the cookie to a user
//!    before any handler runs
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - The JWT session cookie is HttpOnly with a 30-day expiry
//! - Deactivated accounts fail authentication

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used items
pub use handlers::{login, logout, signup};
pub use users::User;
