/**
 * Signup Handler
 *
 * User registration for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate display name, email format, and password strength
 * 2. Reject duplicate email addresses
 * 3. Hash the password with bcrypt
 * 4. Create the (unverified) user with a verification token
 * 5. Issue the session cookie and return the public profile
 *
 * # Validation
 *
 * - Email must look like an address (local part, '@', dotted domain)
 * - Password must be at least 12 characters and contain a letter, a
 *   number, and a special character
 */

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bcrypt::{hash, DEFAULT_COST};
use uuid::Uuid;

use crate::backend::auth::handlers::types::SignupRequest;
use crate::backend::auth::sessions::{create_token, session_cookie};
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Basic structural email check
pub(super) fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Password policy: at least 12 chars with a letter, a number, and a
/// special character
pub(super) fn is_valid_password(password: &str) -> bool {
    password.len() >= 12
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Sign up handler
pub async fn signup(
    State(app): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pool = app
        .db_pool
        .as_ref()
        .ok_or_else(|| ApiError::internal("database not configured"))?;

    if request.full_name.trim().is_empty() {
        return Err(ApiError::validation("fullName", "All fields are required"));
    }

    if !is_valid_email(&request.email) {
        return Err(ApiError::validation(
            "email",
            "A valid email address is required",
        ));
    }

    if !is_valid_password(&request.password) {
        return Err(ApiError::validation(
            "password",
            "Password must be at least 12 characters long, contain at least one letter, one number, and one special character.",
        ));
    }

    if get_user_by_email(pool, &request.email).await?.is_some() {
        return Err(ApiError::validation("email", "Email already exists"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| ApiError::internal(format!("failed to hash password: {e}")))?;

    let verification_token = Uuid::new_v4().simple().to_string();

    let user = create_user(
        pool,
        request.full_name.trim().to_string(),
        request.email.clone(),
        password_hash,
        verification_token.clone(),
    )
    .await?;

    // Mail delivery is out of scope; the verification link is surfaced in
    // the server log instead.
    tracing::info!(
        "User created: {} ({}); verification token {}",
        user.full_name,
        user.email,
        verification_token
    );

    let token =
        create_token(user.id).map_err(|e| ApiError::internal(format!("token error: {e}")))?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(user.profile()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@nodot"));
        assert!(!is_valid_email("ada@.com"));
    }

    #[test]
    fn test_is_valid_password() {
        assert!(is_valid_password("correct-horse-42!"));
        assert!(is_valid_password("abcdefghijk1!"));
        // Too short
        assert!(!is_valid_password("short1!"));
        // Missing number
        assert!(!is_valid_password("abcdefghijkl!"));
        // Missing special character
        assert!(!is_valid_password("abcdefghijkl1"));
        // Missing letter
        assert!(!is_valid_password("123456789012!"));
    }
}
