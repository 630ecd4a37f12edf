/**
 * Login and Logout Handlers
 *
 * POST /api/auth/login verifies credentials and issues the session
 * cookie; POST /api/auth/logout clears it. Deactivated accounts cannot
 * log back in.
 */

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};

use crate::backend::auth::handlers::types::{LoginRequest, MessageResponse};
use crate::backend::auth::sessions::{clear_session_cookie, create_token, session_cookie};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Login handler
pub async fn login(
    State(app): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = app
        .db_pool
        .as_ref()
        .ok_or_else(|| ApiError::internal("database not configured"))?;

    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::validation(
            "email",
            "Email and password are required",
        ));
    }

    let user = get_user_by_email(pool, &request.email)
        .await?
        .ok_or_else(|| ApiError::not_found("Account not found"))?;

    let password_ok = bcrypt::verify(&request.password, &user.password_hash)
        .map_err(|e| ApiError::internal(format!("bcrypt verify failed: {e}")))?;

    if !password_ok {
        return Err(ApiError::validation("password", "Invalid password"));
    }

    if !user.active {
        return Err(ApiError::Forbidden(
            "Account has been deactivated".to_string(),
        ));
    }

    let token =
        create_token(user.id).map_err(|e| ApiError::internal(format!("token error: {e}")))?;

    tracing::info!("User logged in: {}", user.email);

    Ok((
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(user.profile()),
    ))
}

/// Logout handler: clears the session cookie
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(MessageResponse::new("Logged out")),
    )
}
