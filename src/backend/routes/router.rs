/**
 * Router Configuration
 *
 * Combines the REST API routes and the push channel endpoint into the
 * application router.
 */

use axum::{routing, Router};

use crate::backend::presence::socket::ws_handler;
use crate::backend::routes::api_routes::api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = api_routes(&app_state)
        // Push channel; does its own token authentication during upgrade
        .route("/ws", routing::get(ws_handler))
        .fallback(|| async { "404 Not Found" });

    router.with_state(app_state)
}
