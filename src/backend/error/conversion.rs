/**
 * Error Conversion
 *
 * Converts `ApiError` into HTTP responses. Client-caused errors surface
 * their message; server-side failures are logged here and replaced with a
 * generic body so store details never leak to clients.
 *
 * Response shape: `{"error": "..."}`, plus a `"field"` key for
 * validation failures.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {:?}", self);
        }

        let body = match self.field() {
            Some(field) => serde_json::json!({
                "error": self.client_message(),
                "field": field,
            }),
            None => serde_json::json!({
                "error": self.client_message(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_response_includes_field() {
        let response = ApiError::validation("password", "too short").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_response_is_500() {
        let response = ApiError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
