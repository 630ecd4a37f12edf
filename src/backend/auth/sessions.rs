/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation. The token is
 * issued as an HTTP cookie at signup/login and cleared at logout; the
 * auth middleware extracts it from the Cookie header on every protected
 * request.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "jwt";

/// Token lifetime: 30 days
const TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Get JWT secret from environment
fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|err| {
        tracing::warn!("Missing JWT_SECRET ({}), using development fallback", err);
        "tincan-dev-secret-change-in-production".to_string()
    })
}

/// Create a JWT token for a user
pub fn create_token(user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };

    let secret = get_jwt_secret();
    let key = EncodingKey::from_secret(secret.as_ref());

    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_jwt_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Extract the user id from a token
pub fn user_id_from_token(token: &str) -> Option<Uuid> {
    let claims = verify_token(token).ok()?;
    Uuid::parse_str(&claims.sub).ok()
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age={}",
        SESSION_COOKIE, token, TOKEN_TTL_SECS
    )
}

/// `Set-Cookie` value that clears the session cookie
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age=0",
        SESSION_COOKIE
    )
}

/// Pull the session token out of a raw `Cookie` header value
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').map(str::trim).find_map(|pair| {
        pair.strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
            .filter(|value| !value.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_token() {
        let result = create_token(Uuid::new_v4());
        assert!(result.is_ok());
        assert!(!result.unwrap().is_empty());
    }

    #[test]
    fn test_verify_token_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id).unwrap();

        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_user_id_from_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id).unwrap();
        assert_eq!(user_id_from_token(&token), Some(user_id));
    }

    #[test]
    fn test_verify_invalid_token() {
        assert!(verify_token("invalid.token.here").is_err());
        assert_eq!(user_id_from_token("invalid.token.here"), None);
    }

    #[test]
    fn test_token_from_cookie_header() {
        assert_eq!(
            token_from_cookie_header("jwt=abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(
            token_from_cookie_header("theme=dark; jwt=abc; other=1"),
            Some("abc")
        );
        assert_eq!(token_from_cookie_header("theme=dark"), None);
        assert_eq!(token_from_cookie_header("jwt="), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok");
        assert!(cookie.starts_with("jwt=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));

        let cleared = clear_session_cookie();
        assert!(cleared.contains("Max-Age=0"));
    }
}
