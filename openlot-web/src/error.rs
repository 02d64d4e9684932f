//! Error handling for the web server
//!
//! All handlers return `Result<T, AppError>`. Anything that escapes a
//! handler is logged server-side and rendered as the site-styled error page
//! with a generic message; internal details never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use openlot_shared::auth::{jwt::JwtError, password::PasswordError};

use crate::views;

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

/// Unified handler error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Requested page or record does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database failure (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing/verification failure (500)
    #[error("Password operation failed: {0}")]
    Password(#[from] PasswordError),

    /// Identity token failure (500)
    ///
    /// Only reachable when issuing a token; invalid inbound tokens are
    /// handled by the identity middleware, which simply treats the request
    /// as anonymous.
    #[error("Token operation failed: {0}")]
    Token(#[from] JwtError),

    /// Anything else (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "404", msg.clone()),
            _ => {
                tracing::error!("handler error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server Error",
                    "Oh no! There was a crash. Maybe try a different route?".to_string(),
                )
            }
        };

        let page = views::layout::error_page(title, &message);
        (status, page).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let response = AppError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display() {
        let err = AppError::NotFound("Sorry, we appear to have lost that page.".to_string());
        assert_eq!(
            err.to_string(),
            "Not found: Sorry, we appear to have lost that page."
        );
    }
}
