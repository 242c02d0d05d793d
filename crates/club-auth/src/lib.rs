//! # Club Auth
//!
//! Token issuance and verification for the club apps.
//!
//! - [`claims`]: The [`Claims`] carried by every access token
//! - [`jwt`]: Token creation and verification
//! - [`error`]: [`TokenError`], distinguishing expired, forged and malformed tokens
//!
//! # Example
//!
//! ```ignore
//! use club_auth::{create_access_token, verify_token};
//! use club_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(user_id, "user@example.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! println!("User ID: {}", claims.sub);
//! ```

pub mod claims;
pub mod error;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use error::TokenError;
pub use jwt::{
    create_access_token, create_access_token_with_expiry, user_id_from_token, verify_token,
};
