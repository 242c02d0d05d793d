//! # Club Config
//!
//! Configuration types for the club apps, loaded once at process start.
//!
//! - [`jwt`]: Token signing secret and lifetime
//! - [`database`]: Shared and per-app SQLite database locations
//! - [`logging`]: Log level and output format
//!
//! Every type exposes `from_env()` plus a `from_lookup()` variant that takes
//! the variable source as a closure.
//!
//! # Example
//!
//! ```ignore
//! use club_config::{DatabaseConfig, JwtConfig};
//!
//! dotenvy::dotenv().ok();
//! let jwt_config = JwtConfig::from_env()?;
//! let db_config = DatabaseConfig::from_env()?;
//! ```

pub mod database;
pub mod error;
pub mod jwt;
pub mod logging;

// Re-export commonly used types at crate root
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use logging::{LogConfig, LogFormat};
