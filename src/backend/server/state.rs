/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Thread Safety
 *
 * All state is designed to be thread-safe:
 * - `PresenceRegistry` is an `Arc<RwLock<..>>` map internally
 * - The database pool is `Clone` and shares connections
 * - `Option<T>` for the database, which may not be configured
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::presence::registry::PresenceRegistry;

/// Application state shared by every handler and the push channel
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g., if the
    /// `DATABASE_URL` environment variable is not set). Handlers report
    /// the store as unavailable in that case.
    pub db_pool: Option<PgPool>,

    /// Presence map: user id → live push connection
    pub presence: PresenceRegistry,
}

impl AppState {
    pub fn new(db_pool: Option<PgPool>) -> Self {
        Self {
            db_pool,
            presence: PresenceRegistry::new(),
        }
    }
}

/// Allow handlers to extract the optional database pool directly
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract the presence registry directly
impl FromRef<AppState> for PresenceRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}
