/// Bearer token authentication for Axum
///
/// Extracts the `Authorization: Bearer <token>` header, validates the JWT
/// and produces an [`AuthContext`] for request extensions. The API crate
/// decides what a missing credential means for a route (it redirects to the
/// sign-in page); a present but bad credential is always a 401.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap};
/// use askbase_shared::auth::jwt::{create_token, Claims};
/// use askbase_shared::auth::middleware::{authenticate, AuthError};
///
/// let secret = "a-secret-that-is-at-least-32-bytes-long";
/// let token = create_token(&Claims::new(5), secret).unwrap();
///
/// let mut headers = HeaderMap::new();
/// assert!(matches!(authenticate(&headers, secret), Err(AuthError::MissingCredentials)));
///
/// headers.insert(header::AUTHORIZATION, format!("Bearer {}", token).parse().unwrap());
/// assert_eq!(authenticate(&headers, secret).unwrap().user_id, 5);
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

use super::jwt::{validate_token, JwtError};

/// Authentication context added to request extensions
///
/// Handlers extract it with Axum's `Extension` extractor.
///
/// ```
/// use axum::Extension;
/// use askbase_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: i64,
}

impl AuthContext {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}

/// Error type for authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header at all
    #[error("Missing credentials")]
    MissingCredentials,

    /// Header present but not a bearer token
    #[error("{0}")]
    InvalidFormat(String),

    /// Token failed validation
    #[error("{0}")]
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer { .. } => AuthError::InvalidToken("Invalid issuer".to_string()),
            other => AuthError::InvalidToken(format!("Invalid token: {}", other)),
        }
    }
}

/// Returns the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat("Authorization header is not valid text".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

/// Validates the request's bearer token
///
/// # Errors
///
/// - `AuthError::MissingCredentials` if there is no Authorization header
/// - `AuthError::InvalidFormat` if the header is not a bearer token
/// - `AuthError::InvalidToken` if the JWT does not validate
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let token = bearer_token(headers)?;
    let claims = validate_token(token, secret)?;

    Ok(AuthContext::new(claims.sub))
}
