/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in user. It extracts
 * the session token from the `jwt` cookie (with an `Authorization: Bearer`
 * fallback), verifies it, resolves the account, and attaches the full
 * user record to request extensions for handlers.
 *
 * Requests with a missing or invalid token are rejected with 401 before
 * any service logic runs; tokens for unknown accounts yield 404 and
 * deactivated accounts are treated as unauthorized.
 */

use axum::{
    extract::{Request, State},
    http::header::{AUTHORIZATION, COOKIE},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::{token_from_cookie_header, verify_token};
use crate::backend::auth::users::{self, User};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Pull the session token from the request: cookie first, then bearer header
fn extract_token(request: &Request) -> Option<String> {
    let from_cookie = request
        .headers()
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(token_from_cookie_header);

    if let Some(token) = from_cookie {
        return Some(token.to_string());
    }

    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Authentication middleware for protected routes
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&request).ok_or_else(|| {
        tracing::warn!("Missing session token on {}", request.uri().path());
        ApiError::Unauthorized
    })?;

    let claims = verify_token(&token).map_err(|e| {
        tracing::warn!("Invalid session token: {:?}", e);
        ApiError::Unauthorized
    })?;

    let user_id = claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized)?;

    let pool = app_state
        .db_pool
        .as_ref()
        .ok_or_else(|| ApiError::internal("database not configured"))?;

    let user = users::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !user.active {
        tracing::warn!("Rejected request from deactivated account {}", user.id);
        return Err(ApiError::Unauthorized);
    }

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Usable as a handler parameter on any route behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().cloned().ok_or_else(|| {
            tracing::warn!("Authenticated user not found in request extensions");
            ApiError::Unauthorized
        })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    fn request_with_headers(headers: &[(&str, &str)]) -> Request {
        let mut builder = HttpRequest::builder().uri("http://example.com/api/message/users");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_token_prefers_cookie() {
        let request = request_with_headers(&[
            ("cookie", "jwt=cookie-token"),
            ("authorization", "Bearer header-token"),
        ]);
        assert_eq!(extract_token(&request).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn test_extract_token_bearer_fallback() {
        let request = request_with_headers(&[("authorization", "Bearer header-token")]);
        assert_eq!(extract_token(&request).as_deref(), Some("header-token"));
    }

    #[test]
    fn test_extract_token_absent() {
        let request = request_with_headers(&[("cookie", "theme=dark")]);
        assert_eq!(extract_token(&request), None);
    }
}
