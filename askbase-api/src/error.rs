/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// Handlers return `ApiResult<T>`; anything that is not a redirect or a form
/// re-render ends up here.
///
/// # Example
///
/// ```
/// use askbase_api::error::{ApiError, ApiResult};
///
/// fn find(id: i64) -> ApiResult<i64> {
///     if id > 0 {
///         Ok(id)
///     } else {
///         Err(ApiError::NotFound("record not found".to_string()))
///     }
/// }
///
/// assert!(find(0).is_err());
/// ```

use askbase_shared::{
    auth::middleware::AuthError,
    store::StoreError,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidationErrors;

use crate::response::FlashRedirect;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Message used for every missing record
pub const RECORD_NOT_FOUND: &str = "record not found";

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401) - credentials present but invalid
    Unauthorized(String),

    /// No credentials on a gated route; redirects to the sign-in page (303)
    LoginRequired { login_path: String },

    /// Not found (404)
    NotFound(String),

    /// Internal server error (500)
    InternalError(String),

}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::LoginRequired { login_path } => write!(f, "Login required: {}", login_path),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::LoginRequired { login_path } => {
                return FlashRedirect::to(login_path)
                    .with_error("You need to sign in or sign up before continuing.")
                    .into_response();
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details: None,
        });

        (status, body).into_response()
    }
}

/// Flattens validator errors into per-field details
pub fn validation_details(errors: &ValidationErrors) -> Vec<ValidationErrorDetail> {
    let mut details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();

    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingRecord { .. } => ApiError::NotFound(RECORD_NOT_FOUND.to_string()),
            StoreError::Database(sqlx::Error::RowNotFound) => {
                ApiError::NotFound(RECORD_NOT_FOUND.to_string())
            }
            StoreError::Database(e) => ApiError::InternalError(format!("Database error: {}", e)),
            StoreError::Unavailable(msg) => ApiError::InternalError(format!("Store unavailable: {}", msg)),
        }
    }
}

/// Convert authentication errors to API errors
///
/// Missing credentials are handled by the auth layer, which knows the
/// sign-in path; here they are a plain 401.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => ApiError::Unauthorized("Missing credentials".to_string()),
            AuthError::InvalidFormat(msg) | AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound(RECORD_NOT_FOUND.to_string());
        assert_eq!(err.to_string(), "Not found: record not found");
    }

    #[test]
    fn test_status_codes() {
        let response = ApiError::NotFound(RECORD_NOT_FOUND.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::InternalError("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::LoginRequired {
            login_path: "/users/sign_in".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/users/sign_in");
    }

    #[test]
    fn test_store_error_conversion() {
        let err: ApiError = StoreError::MissingRecord { kind: "answer", id: 3 }.into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = StoreError::Unavailable("down".to_string()).into();
        assert!(matches!(err, ApiError::InternalError(_)));
    }

    #[test]
    fn test_validation_details() {
        let errors = Sample { name: "ab".to_string() }.validate().unwrap_err();
        let details = validation_details(&errors);

        assert_eq!(
            details,
            vec![ValidationErrorDetail {
                field: "name".to_string(),
                message: "too short".to_string(),
            }]
        );
    }
}
