use std::env;

use crate::error::ConfigError;

/// Default access token lifetime in days.
pub const DEFAULT_ACCESS_TOKEN_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 86_400;

/// Signing secret and token lifetime, loaded once at startup and passed by
/// reference to everything that issues or verifies tokens.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_DAYS * SECONDS_PER_DAY,
        }
    }

    /// Reads `JWT_SECRET_KEY` (required) and `JWT_ACCESS_EXPIRY_DAYS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET_KEY")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET_KEY"))?;

        let days = match lookup("JWT_ACCESS_EXPIRY_DAYS") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(days) if days > 0 => days,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "JWT_ACCESS_EXPIRY_DAYS",
                        value: raw,
                        reason: "expected a positive number of days",
                    });
                }
            },
            None => DEFAULT_ACCESS_TOKEN_DAYS,
        };

        Ok(Self {
            secret,
            access_token_expiry: days * SECONDS_PER_DAY,
        })
    }
}

// Keeps the secret out of logs and `#[instrument]` spans.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}
