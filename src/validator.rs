use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use club_core::AppError;

/// Validates a DTO without touching it. The error names the first failing
/// field and why it failed.
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate().map_err(AppError::from)
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        let mut err = AppError::new(StatusCode::BAD_REQUEST, anyhow!("{} is required", field));
        err.field = Some(field.to_string());
        return err;
    }

    if error_msg.contains("invalid type") {
        return AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("Invalid field type in request"),
        );
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("Missing 'Content-Type: application/json' header"),
        );
    }

    AppError::new(StatusCode::BAD_REQUEST, anyhow!("Invalid request body"))
}

/// JSON body extractor that runs `validator` rules before the handler sees
/// the value. Malformed bodies are rejected with 400, rule violations with 422.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        validate_dto(&value)?;

        Ok(ValidatedJson(value))
    }
}
