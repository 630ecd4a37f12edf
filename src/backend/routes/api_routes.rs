/**
 * API Route Handlers
 *
 * Route table for the REST API.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/signup` - User registration
 * - `POST /api/auth/login` - User login
 * - `POST /api/auth/logout` - Clear the session cookie
 * - `GET  /api/auth/verify-email` - Email verification by token
 *
 * ## Account (protected)
 * - `GET    /api/auth/check` - Current user's profile
 * - `PUT    /api/auth/profile` - Update display name
 * - `PUT    /api/auth/credentials` - Change email/password
 * - `DELETE /api/auth/deactivate` - Soft-deactivate the account
 * - `POST   /api/auth/groups/{id}` - Add/remove a user from a group
 * - `POST   /api/auth/block/{id}` - Toggle block
 * - `POST   /api/auth/mute/{id}` - Toggle mute
 *
 * ## Messaging (protected)
 * - `GET  /api/message/users` - Directory with relation flags
 * - `GET  /api/message/{id}` - Conversation with a counterpart
 *   (marks their messages read as a side effect)
 * - `POST /api/message/{id}` - Send a message
 *
 * Protected routes sit behind `auth_middleware`, which resolves the
 * session cookie to a user before any handler runs.
 */

use axum::{middleware, routing, Router};

use crate::backend::auth::handlers::{
    check_auth, deactivate_account, login, logout, signup, toggle_block, toggle_mute,
    update_credentials, update_group_membership, update_profile, verify_email,
};
use crate::backend::messaging::handlers::{get_messages, get_users, send_message};
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::server::state::AppState;

/// Build the REST API router
pub fn api_routes(app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/auth/signup", routing::post(signup))
        .route("/api/auth/login", routing::post(login))
        .route("/api/auth/logout", routing::post(logout))
        .route("/api/auth/verify-email", routing::get(verify_email));

    let protected = Router::new()
        .route("/api/auth/check", routing::get(check_auth))
        .route("/api/auth/profile", routing::put(update_profile))
        .route("/api/auth/credentials", routing::put(update_credentials))
        .route("/api/auth/deactivate", routing::delete(deactivate_account))
        .route(
            "/api/auth/groups/{id}",
            routing::post(update_group_membership),
        )
        .route("/api/auth/block/{id}", routing::post(toggle_block))
        .route("/api/auth/mute/{id}", routing::post(toggle_mute))
        .route("/api/message/users", routing::get(get_users))
        .route(
            "/api/message/{id}",
            routing::get(get_messages).post(send_message),
        )
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    public.merge(protected)
}
