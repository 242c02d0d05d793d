//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::TokenError;

/// JWT claims for access tokens.
///
/// # Fields
///
/// - `sub`: User ID (subject), serialized as a string
/// - `email`: User's email address
/// - `iat`: Token issued-at timestamp
/// - `exp`: Token expiration timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parses the subject back into the numeric user ID.
    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::InvalidSubject)
    }
}
