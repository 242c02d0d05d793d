use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use club_auth::{Claims, verify_token};
use club_config::JwtConfig;
use club_core::AppError;

/// Verifies an `Authorization` header value and returns the token's claims.
///
/// Only establishes identity; callers decide what the identity may do.
pub fn authenticate(
    authorization: Option<&str>,
    jwt_config: &JwtConfig,
) -> Result<Claims, AppError> {
    let auth_header = authorization
        .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

    Ok(verify_token(token, jwt_config)?)
}

fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}

/// Extractor that validates the bearer token and provides its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<i64, AppError> {
        Ok(self.0.user_id()?)
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    JwtConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jwt_config = JwtConfig::from_ref(state);
        authenticate(authorization_header(parts), &jwt_config).map(AuthUser)
    }
}

/// The authenticated caller's user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUserId(pub i64);

impl<S> FromRequestParts<S> for CurrentUserId
where
    JwtConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        Ok(CurrentUserId(claims.user_id()?))
    }
}

/// The authenticated caller's email, as recorded in the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUserEmail(pub String);

impl<S> FromRequestParts<S> for CurrentUserEmail
where
    JwtConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        Ok(CurrentUserEmail(claims.email))
    }
}
