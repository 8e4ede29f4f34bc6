//! Argon2id password hashing.
//!
//! Hashing and verification are CPU-bound and run on tokio's blocking pool.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;
use std::sync::OnceLock;

use crate::core::error::{AppError, Result};

fn hash_blocking(password: &str) -> std::result::Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| format!("failed to hash password: {e}"))
}

fn verify_blocking(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Hash verified against when the account does not exist, so that unknown
/// emails take as long to reject as wrong passwords.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_blocking("mediadrop-placeholder-password").ok())
        .as_deref()
}

pub async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task failed: {e}")))?
        .map_err(AppError::Internal)
}

/// Check `password` against a stored hash. `None` means no such account:
/// the dummy hash is checked instead and the result is always `false`.
pub async fn verify_password(password: String, hash: Option<String>) -> Result<bool> {
    tokio::task::spawn_blocking(move || match hash {
        Some(hash) => verify_blocking(&password, &hash),
        None => {
            if let Some(dummy) = dummy_hash() {
                let _ = verify_blocking(&password, dummy);
            }
            false
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("password verification task failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("test_password_123".to_string())
            .await
            .expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("test_password_123".to_string(), Some(hash.clone()))
            .await
            .expect("verify"));
        assert!(!verify_password("wrong_password".to_string(), Some(hash))
            .await
            .expect("verify"));
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same".to_string()).await.expect("hash");
        let b = hash_password("same".to_string()).await.expect("hash");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_missing_account_never_verifies() {
        assert!(!verify_password("anything".to_string(), None)
            .await
            .expect("verify"));
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        assert!(!verify_blocking("password", "not-a-phc-string"));
    }
}
