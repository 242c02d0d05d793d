//! JWT (JSON Web Token) issuance and verification.
//!
//! Tokens are HS256-signed and carry the user ID (as a string `sub`), the
//! email, and issued-at / expiry timestamps. The signing secret comes from
//! [`JwtConfig`], which callers load once at startup and pass in explicitly.
//! Changing the secret invalidates every outstanding token.
//!
//! # Example
//!
//! ```ignore
//! use club_auth::{create_access_token, verify_token};
//! use club_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(user.id, user.email.as_str(), &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, user.id);
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

use club_config::JwtConfig;

use crate::claims::Claims;
use crate::error::TokenError;

/// Creates an access token valid for `jwt_config.access_token_expiry` seconds
/// (30 days unless configured otherwise).
pub fn create_access_token(
    user_id: i64,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    create_access_token_with_expiry(
        user_id,
        email,
        Duration::seconds(jwt_config.access_token_expiry),
        jwt_config,
    )
}

/// Creates an access token with an explicit lifetime.
///
/// A negative `expires_in` produces a token that is already expired.
pub fn create_access_token_with_expiry(
    user_id: i64,
    email: &str,
    expires_in: Duration,
    jwt_config: &JwtConfig,
) -> Result<String, TokenError> {
    let now = Utc::now();

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verifies signature, structure and expiry, returning the embedded claims.
///
/// # Errors
///
/// - [`TokenError::InvalidSignature`] if the token was not signed with this secret
/// - [`TokenError::Expired`] if `exp` is in the past (no leeway)
/// - [`TokenError::InvalidSubject`] if `sub` is not a user ID
/// - [`TokenError::Malformed`] for anything else
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let err = match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        };
        tracing::debug!(reason = %err, "token rejected");
        err
    })?;

    claims.user_id()?;
    Ok(claims)
}

/// Verifies a token and returns only the user ID.
pub fn user_id_from_token(token: &str, jwt_config: &JwtConfig) -> Result<i64, TokenError> {
    verify_token(token, jwt_config)?.user_id()
}
