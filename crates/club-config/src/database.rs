use std::env;

use crate::error::ConfigError;

pub const DEFAULT_COMMON_DB_PATH: &str = "../common-club/common-club.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Locations of the shared database and of the current app's own database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub common_db_path: String,
    pub app_db_path: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            common_db_path: DEFAULT_COMMON_DB_PATH.to_string(),
            app_db_path: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Reads `COMMON_DB_PATH`, `APP_DB_PATH` and `DB_MAX_CONNECTIONS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "DB_MAX_CONNECTIONS",
                        value: raw,
                        reason: "expected a positive integer",
                    });
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            common_db_path: lookup("COMMON_DB_PATH")
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COMMON_DB_PATH.to_string()),
            app_db_path: lookup("APP_DB_PATH").filter(|p| !p.trim().is_empty()),
            max_connections,
        })
    }

    pub fn with_common_db_path(mut self, path: impl Into<String>) -> Self {
        self.common_db_path = path.into();
        self
    }

    pub fn with_app_db_path(mut self, path: impl Into<String>) -> Self {
        self.app_db_path = Some(path.into());
        self
    }

    /// The app database path; apps that touch their own data must set it.
    pub fn app_db_path(&self) -> Result<&str, ConfigError> {
        self.app_db_path
            .as_deref()
            .ok_or(ConfigError::Missing("APP_DB_PATH"))
    }
}
