//! User domain models and DTOs.
//!
//! Users live in the shared database and authenticate once for every club
//! app. [`User`] is the stored row and is deliberately not `Serialize`;
//! anything leaving the process goes through [`UserResponse`], which never
//! carries the password hash.

use chrono::{DateTime, Utc};
use club_core::serde::{deserialize_clearable_string, deserialize_optional_string};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::value_types::Email;

/// A user account row.
#[derive(FromRow, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: Email,
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Registration payload.
#[derive(Deserialize, Clone, Validate, ToSchema)]
pub struct UserCreate {
    #[validate(email(message = "is not a valid email address"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Login payload.
#[derive(Deserialize, Clone, Validate, ToSchema)]
pub struct UserLogin {
    #[validate(email(message = "is not a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "password123")]
    pub password: String,
}

impl fmt::Debug for UserLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserLogin")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Profile update. Absent fields are left unchanged; `"name": null` (or
/// blank) removes the display name.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserUpdate {
    #[serde(default, deserialize_with = "deserialize_clearable_string")]
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[validate(email(message = "is not a valid email address"))]
    pub email: Option<String>,
}

#[derive(Deserialize, Clone, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub current_password: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub new_password: String,
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest").finish_non_exhaustive()
    }
}

/// User data as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Successful login.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub user: UserResponse,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user,
        }
    }
}
