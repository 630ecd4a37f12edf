//! Authentication Handlers Module
//!
//! HTTP handlers for the account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration
//! ├── login.rs    - Login and logout
//! ├── account.rs  - Session check, verification, profile, credentials, deactivation
//! └── groups.rs   - Group membership, block, and mute toggles
//! ```

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login and logout handlers
pub mod login;

/// Session check, verification, profile, credentials, deactivation
pub mod account;

/// Group membership, block, and mute handlers
pub mod groups;

// Re-export commonly used types
pub use types::{LoginRequest, SignupRequest, UpdateCredentialsRequest, UpdateProfileRequest};

// Re-export handlers
pub use account::{check_auth, deactivate_account, update_credentials, update_profile, verify_email};
pub use groups::{toggle_block, toggle_mute, update_group_membership};
pub use login::{login, logout};
pub use signup::signup;
