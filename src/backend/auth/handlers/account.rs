/**
 * Account Handlers
 *
 * Session check, email verification, profile and credentials updates, and
 * soft deactivation. All but verify-email sit behind the auth middleware.
 */

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::backend::auth::handlers::signup::{is_valid_email, is_valid_password};
use crate::backend::auth::handlers::types::{
    MessageResponse, UpdateCredentialsRequest, UpdateProfileRequest,
};
use crate::backend::auth::sessions::clear_session_cookie;
use crate::backend::auth::users;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::user::UserProfile;

/// Get the authenticated user's profile (GET /api/auth/check)
pub async fn check_auth(AuthUser(user): AuthUser) -> Json<UserProfile> {
    Json(user.profile())
}

/// Query parameters for GET /api/auth/verify-email
#[derive(Debug, Deserialize)]
pub struct VerifyEmailParams {
    pub token: String,
}

/// Verify an email address by token (GET /api/auth/verify-email?token=)
pub async fn verify_email(
    State(app): State<AppState>,
    Query(params): Query<VerifyEmailParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    let pool = app
        .db_pool
        .as_ref()
        .ok_or_else(|| ApiError::internal("database not configured"))?;

    let user = users::verify_by_token(pool, &params.token)
        .await?
        .ok_or_else(|| {
            ApiError::validation("token", "Invalid or expired verification token")
        })?;

    tracing::info!("Email verified for {}", user.email);

    Ok(Json(MessageResponse::new("Email verified")))
}

/// Update the display name (PUT /api/auth/profile)
pub async fn update_profile(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let pool = app
        .db_pool
        .as_ref()
        .ok_or_else(|| ApiError::internal("database not configured"))?;

    let full_name = request.full_name.trim();
    if full_name.is_empty() {
        return Err(ApiError::validation("fullName", "Display name is required"));
    }

    let updated = users::update_full_name(pool, user.id, full_name).await?;

    Ok(Json(updated.profile()))
}

/// Change email and/or password (PUT /api/auth/credentials)
///
/// Requires the current password; the new email must be unused and the
/// new password must satisfy the signup policy.
pub async fn update_credentials(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateCredentialsRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let pool = app
        .db_pool
        .as_ref()
        .ok_or_else(|| ApiError::internal("database not configured"))?;

    let password_ok = bcrypt::verify(&request.current_password, &user.password_hash)
        .map_err(|e| ApiError::internal(format!("bcrypt verify failed: {e}")))?;
    if !password_ok {
        return Err(ApiError::validation(
            "currentPassword",
            "Invalid password",
        ));
    }

    if request.new_email.is_none() && request.new_password.is_none() {
        return Err(ApiError::validation(
            "newEmail",
            "Nothing to update",
        ));
    }

    let email = match &request.new_email {
        Some(new_email) => {
            if !is_valid_email(new_email) {
                return Err(ApiError::validation(
                    "newEmail",
                    "A valid email address is required",
                ));
            }
            if new_email != &user.email
                && users::get_user_by_email(pool, new_email).await?.is_some()
            {
                return Err(ApiError::validation("newEmail", "Email already exists"));
            }
            new_email.clone()
        }
        None => user.email.clone(),
    };

    let password_hash = match &request.new_password {
        Some(new_password) => {
            if !is_valid_password(new_password) {
                return Err(ApiError::validation(
                    "newPassword",
                    "Password must be at least 12 characters long, contain at least one letter, one number, and one special character.",
                ));
            }
            bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
                .map_err(|e| ApiError::internal(format!("failed to hash password: {e}")))?
        }
        None => user.password_hash.clone(),
    };

    let updated = users::update_credentials(pool, user.id, &email, &password_hash).await?;

    tracing::info!("Credentials updated for user {}", updated.id);

    Ok(Json(updated.profile()))
}

/// Soft-deactivate the account (DELETE /api/auth/deactivate)
///
/// The record is kept (messages still reference it); the account can no
/// longer log in and disappears from the directory.
pub async fn deactivate_account(
    State(app): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let pool = app
        .db_pool
        .as_ref()
        .ok_or_else(|| ApiError::internal("database not configured"))?;

    users::deactivate(pool, user.id).await?;

    tracing::info!("Account deactivated: {}", user.id);

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(MessageResponse::new("Account deactivated")),
    ))
}
