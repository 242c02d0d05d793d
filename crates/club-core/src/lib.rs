//! # Club Core
//!
//! Core types, errors, and utilities shared by the club apps.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Salted password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use club_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash));
//!
//! let error = AppError::validation("email", "is not a valid email address");
//! ```

pub mod errors;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password, verify_password_unknown_account};
