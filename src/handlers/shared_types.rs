//! Shared handler types: the API error and small request-validation helpers.
//!
//! Two error kinds surface to clients. A typed client error carries an
//! explicit status and message and is serialized as `{"error": "..."}`.
//! Everything else (database and filesystem failures) is logged server-side
//! and reported as a bare 500 with no internal detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error type returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    /// A client-facing failure with an explicit status and message.
    Client { status: StatusCode, message: String },

    /// An internal failure; never leaked to the client.
    Internal(anyhow::Error),
}

impl ApiError {
    // ---
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::Client {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Client {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::Client {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Client {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // ---
        match self {
            ApiError::Client { status, message } => {
                (status, Json(ErrorResponse { error: message })).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Lets handlers use `?` on anything convertible to `anyhow::Error`.
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        ApiError::Internal(err.into())
    }
}

/// Strict id validation: one parse, must be a positive integer.
pub fn parse_positive_id(raw: &str, name: &str) -> Result<i64, ApiError> {
    // ---
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(format!(
            "{name} must be a positive integer"
        ))),
    }
}

/// True when an error is a unique-constraint violation from the database.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    // ---
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn valid_ids_parse() {
        // ---
        assert_eq!(parse_positive_id("1", "recordId").unwrap(), 1);
        assert_eq!(parse_positive_id("999999", "recordId").unwrap(), 999_999);
    }

    #[test]
    fn invalid_ids_are_bad_requests() {
        // ---
        for raw in ["0", "-3", "abc", "1.5", "", " 1", "1e3"] {
            let err = parse_positive_id(raw, "recordId").unwrap_err();
            match err {
                ApiError::Client { status, .. } => assert_eq!(status, StatusCode::BAD_REQUEST),
                ApiError::Internal(_) => panic!("expected client error for {raw:?}"),
            }
        }
    }
}
