/// Authentication and authorization
///
/// # Modules
///
/// - [`jwt`]: JWT validation (and minting, for tests and tooling)
/// - [`middleware`]: Bearer token extraction and [`middleware::AuthContext`]
/// - [`authorization`]: Owner/admin/reputation privilege checks
///
/// # Example
///
/// ```
/// use askbase_shared::auth::jwt::{create_token, validate_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let token = create_token(&Claims::new(1), "a-secret-that-is-at-least-32-bytes-long")?;
/// let claims = validate_token(&token, "a-secret-that-is-at-least-32-bytes-long")?;
/// assert_eq!(claims.sub, 1);
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
