/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: state creation, database loading, CORS, and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Load the optional database pool (and run migrations)
 * 2. Create the shared application state (pool + presence registry)
 * 3. Build the CORS layer from configured origins
 * 4. Assemble the router
 *
 * A missing database does not prevent startup; request handlers report
 * the store as unavailable instead.
 */

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{cors_origins, load_database};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing tincan backend server");

    let db_pool = load_database().await;

    let app_state = AppState::new(db_pool);

    // Credentialed CORS: the session cookie must survive cross-origin
    // requests from the frontend, so wildcard origins are not an option.
    let cors = CorsLayer::new()
        .allow_origin(cors_origins())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let app = create_router(app_state).layer(cors);

    tracing::info!("Router configured");

    app
}
