/**
 * Server Configuration
 *
 * Loading and validation of server configuration from the environment:
 * the PostgreSQL pool, the listen port, and the allowed CORS origins.
 *
 * # Error Handling
 *
 * Database configuration errors are logged but do not prevent server
 * startup; the server runs without a store and reports it unavailable
 * per request. Malformed CORS origins are skipped with a warning.
 */

use axum::http::HeaderValue;
use sqlx::PgPool;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize database connection pool
///
/// Reads `DATABASE_URL`, connects, and runs the embedded migrations.
/// Returns `None` when the variable is unset or the connection fails.
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            // Migrations may have been applied out-of-band
            tracing::error!("Failed to run database migrations: {:?}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Listen port, from `SERVER_PORT` (default 3000)
pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(3000)
}

/// Allowed CORS origins, from comma-separated `CORS_ORIGINS`
///
/// Defaults to the local development frontend.
pub fn cors_origins() -> Vec<HeaderValue> {
    let raw = std::env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3008,http://127.0.0.1:3008".to_string());

    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Skipping malformed CORS origin: {}", origin);
                None
            }
        })
        .collect()
}
