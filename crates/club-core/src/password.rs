//! Password hashing with bcrypt.
//!
//! Each call to [`hash_password`] generates a fresh salt that is embedded in
//! the returned hash string, so hashing the same password twice yields two
//! different strings that both verify.

use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hash of a password no account uses, at the same cost as real hashes.
static UNUSED_HASH: LazyLock<String> =
    LazyLock::new(|| hash("club-unused-account-password", DEFAULT_COST).unwrap_or_default());

pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Checks `password` against a stored bcrypt hash.
///
/// A malformed hash is treated as a mismatch instead of an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match verify(password, hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::debug!(error = %e, "stored password hash could not be parsed");
            false
        }
    }
}

/// Spends the same bcrypt work as [`verify_password`] when there is no stored
/// hash to check, so a missing account cannot be told apart by response time.
/// Always returns `false`.
pub fn verify_password_unknown_account(password: &str) -> bool {
    verify_password(password, &UNUSED_HASH);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("testpassword123").unwrap();
        assert_ne!(hash, "testpassword123");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify_roundtrip() {
        let hash = hash_password("correctpassword").unwrap();
        assert!(verify_password("correctpassword", &hash));
        assert!(!verify_password("wrongpassword", &hash));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!verify_password("testpassword", "not_a_valid_bcrypt_hash"));
        assert!(!verify_password("testpassword", ""));
    }

    #[test]
    fn test_unknown_account_check_does_full_work() {
        assert!(UNUSED_HASH.starts_with(&format!("$2b${DEFAULT_COST}$")));
        assert!(!verify_password_unknown_account("club-unused-account-password"));
        assert!(!verify_password_unknown_account("anything"));
    }
}
