//! Application error type shared by every club crate.
//!
//! [`AppError`] pairs an HTTP status with an [`anyhow::Error`] and, for
//! validation failures, the name of the offending field. Downstream axum
//! apps return it directly from handlers; the [`IntoResponse`] impl renders
//! `{"error": "...", "field": "..."}`.
//!
//! # Taxonomy
//!
//! | Kind | Status | Constructor |
//! |------|--------|-------------|
//! | Validation | 422 | [`AppError::validation`] |
//! | Malformed input | 400 | [`AppError::bad_request`] |
//! | Authentication | 401 | [`AppError::unauthorized`] |
//! | Ownership | 403 | [`AppError::forbidden`] |
//! | Missing row | 404 | [`AppError::not_found`] |
//! | Conflict | 409 | [`AppError::conflict`] |
//! | Everything else | 500 | [`AppError::internal`] |

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    /// Field that failed validation, if any.
    pub field: Option<String>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            field: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow!(message))
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow!(message))
    }

    /// Validation failure on a single field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        let field = field.into();
        let reason = reason.into();
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: anyhow!("{}: {}", field, reason),
            field: Some(field),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.error, "request failed");
        }

        let body = Json(json!({
            "error": self.error.to_string(),
            "field": self.field,
        }));

        let mut response = (self.status, body).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found(anyhow!("Record not found")),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::conflict(anyhow!("Record already exists"))
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::bad_request(anyhow!("Referenced record does not exist"))
            }
            _ => AppError::internal(err),
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::internal_error(format!("Password hashing failed: {}", err))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, errs)) => {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_string());
                AppError::validation(field.to_string(), reason)
            }
            None => AppError::new(StatusCode::UNPROCESSABLE_ENTITY, anyhow!("Invalid input")),
        }
    }
}
