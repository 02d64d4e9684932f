//! Identity token generation and validation
//!
//! Tokens are signed with HS256 and carried in an http-only `jwt` cookie.
//! The claims embed the non-secret account fields (id, names, email, role)
//! so the web layer can build per-request identity without a database
//! lookup; the password hash is never part of the token. A token is
//! (re)issued on login and after a profile or password update, with a fixed
//! one-hour expiry.
//!
//! # Example
//!
//! ```
//! use openlot_shared::auth::jwt::{create_token, validate_token, Claims};
//! use openlot_shared::models::account::{Account, AccountType};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let account = Account {
//!     account_id: 7,
//!     account_firstname: "Pat".to_string(),
//!     account_lastname: "Lee".to_string(),
//!     account_email: "pat@example.com".to_string(),
//!     account_password: "$argon2id$...".to_string(),
//!     account_type: AccountType::Client,
//! };
//!
//! let secret = "a-secret-key-at-least-32-bytes-long!";
//! let token = create_token(&Claims::for_account(&account), secret)?;
//! let claims = validate_token(&token, secret)?;
//! assert_eq!(claims.sub, 7);
//! # Ok(())
//! # }
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::account::{Account, AccountType};

/// Fixed lifetime of an identity token
///
/// Role or profile changes made elsewhere are not reflected in an
/// outstanding token; the short expiry bounds how long a stale identity can
/// circulate.
pub const TOKEN_TTL_SECONDS: i64 = 3600;

const ISSUER: &str = "openlot";

/// Error type for token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid token issuer")]
    InvalidIssuer,
}

/// Identity token claims
///
/// # Standard Claims
///
/// - `sub`: Subject (account ID)
/// - `iss`: Issuer (always "openlot")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
///
/// # Custom Claims
///
/// The non-secret account fields shown in page chrome and used by the
/// role guards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - account ID
    pub sub: i32,

    /// Issuer - always "openlot"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Account first name
    pub first_name: String,

    /// Account last name
    pub last_name: String,

    /// Account email
    pub email: String,

    /// Account role
    pub account_type: AccountType,
}

impl Claims {
    /// Creates claims for an account with the fixed expiry
    ///
    /// Only the non-secret fields are copied; the password hash stays
    /// behind.
    pub fn for_account(account: &Account) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::seconds(TOKEN_TTL_SECONDS);

        Self {
            sub: account.account_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            first_name: account.account_firstname.clone(),
            last_name: account.account_lastname.clone(),
            email: account.account_email.clone(),
            account_type: account.account_type,
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed token from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies the signature, expiry, and issuer.
///
/// # Errors
///
/// Returns an error if the signature is invalid, the token has expired,
/// the issuer doesn't match, or the token format is invalid.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn sample_account() -> Account {
        Account {
            account_id: 42,
            account_firstname: "Taylor".to_string(),
            account_lastname: "Reyes".to_string(),
            account_email: "taylor@example.com".to_string(),
            account_password: "$argon2id$unused".to_string(),
            account_type: AccountType::Employee,
        }
    }

    #[test]
    fn test_claims_for_account() {
        let claims = Claims::for_account(&sample_account());

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.iss, "openlot");
        assert_eq!(claims.first_name, "Taylor");
        assert_eq!(claims.email, "taylor@example.com");
        assert_eq!(claims.account_type, AccountType::Employee);
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_create_and_validate_token() {
        let claims = Claims::for_account(&sample_account());
        let token = create_token(&claims, SECRET).expect("Should create token");

        let validated = validate_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.sub, 42);
        assert_eq!(validated.last_name, "Reyes");
        assert_eq!(validated.account_type, AccountType::Employee);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::for_account(&sample_account());
        let token = create_token(&claims, SECRET).expect("Should create token");

        let result = validate_token(&token, "a-completely-different-secret-key!!");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        let mut claims = Claims::for_account(&sample_account());
        claims.iat -= 2 * TOKEN_TTL_SECONDS;
        claims.exp -= 2 * TOKEN_TTL_SECONDS;

        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).expect("Should create token");
        let result = validate_token(&token, SECRET);

        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_validate_garbage_token() {
        let result = validate_token("not-a-jwt-at-all", SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn test_password_hash_never_in_token() {
        let account = sample_account();
        let claims = Claims::for_account(&account);
        let token = create_token(&claims, SECRET).expect("Should create token");

        // The payload segment is plain base64; the hash must not appear.
        assert!(!token.contains("argon2id"));
    }
}
