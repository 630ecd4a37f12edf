//! tincan - Main Library
//!
//! tincan is a minimal one-to-one messaging application: account
//! signup/login, a friend/group model, and real-time message delivery
//! with read/delivered status tracking, built on a REST API plus a
//! WebSocket push channel.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between backend and client
//!   - Message record and its status lifecycle
//!   - Push channel event vocabulary
//!   - Public user views and relation groups
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with the REST API and WebSocket push channel
//!   - Accounts, sessions, and the auth middleware
//!   - Message persistence and the sent/delivered/read state machine
//!   - Presence registry (user id → live connection)
//!
//! - **`client`** - Headless client-side state
//!   - `ChatStore`: reducer-style view of conversation and presence
//!     state, reconciling REST responses with pushed events
//!
//! # Delivery Model
//!
//! Message delivery is push-then-poll-reconciliation, not a guaranteed
//! delivery protocol: pushes to offline users are dropped, and the
//! correct status is re-established by the next conversation fetch,
//! which is also the authoritative read transition.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;

/// Client-side state store
pub mod client;
