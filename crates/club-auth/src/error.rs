use club_core::AppError;
use thiserror::Error;

/// Why a token could not be issued or accepted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is malformed")]
    Malformed,

    #[error("token subject is missing or not a user id")]
    InvalidSubject,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(msg) => {
                AppError::internal_error(format!("Failed to create token: {}", msg))
            }
            // Callers only learn that the credentials were rejected.
            _ => AppError::unauthorized("Could not validate credentials".to_string()),
        }
    }
}
