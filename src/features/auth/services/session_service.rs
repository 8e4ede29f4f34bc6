use chrono::Utc;
use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::error::Result;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::models::SessionRecord;

/// Length of the raw token in bytes (hex-encoded to twice as many chars)
const TOKEN_BYTES: usize = 32;

/// Issues, resolves and revokes login sessions.
///
/// Clients hold an opaque random token; only its SHA-256 digest is stored.
pub struct SessionService {
    pool: SqlitePool,
    ttl: Duration,
}

impl SessionService {
    pub fn new(pool: SqlitePool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Create a session for `user_id` and return the raw token
    pub async fn issue(&self, user_id: i64) -> Result<String> {
        let token = generate_token();
        let now = Utc::now();
        let expires_at = now.timestamp() + self.ttl.as_secs() as i64;

        sqlx::query(
            r#"
            INSERT INTO sessions (user_id, token_hash, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(hash_token(&token))
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        info!("Session issued: user_id={}, expires_at={}", user_id, expires_at);
        Ok(token)
    }

    /// Resolve a raw token to its user. Unknown and expired tokens give `None`;
    /// expired sessions are deleted on the way.
    pub async fn authenticate(&self, token: &str) -> Result<Option<AuthenticatedUser>> {
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT s.id AS session_id, s.user_id, u.username, u.email, s.expires_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = ?
            "#,
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await?;

        let Some(record) = record else {
            debug!("Unknown session token");
            return Ok(None);
        };

        if record.is_expired(Utc::now().timestamp()) {
            debug!("Session {} expired", record.session_id);
            self.revoke(record.session_id).await?;
            return Ok(None);
        }

        Ok(Some(record.into()))
    }

    /// Delete a session. Returns whether it still existed.
    pub async fn revoke(&self, session_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{insert_user, test_pool};

    #[test]
    fn test_generate_token_shape() {
        let a = generate_token();
        let b = generate_token();

        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_token_is_stable_sha256() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_issue_authenticate_revoke() {
        let pool = test_pool().await;
        let user_id = insert_user(&pool, "jane", "jane@example.com").await;
        let sessions = SessionService::new(pool.clone(), Duration::from_secs(60));

        let token = sessions.issue(user_id).await.expect("issue");
        let user = sessions
            .authenticate(&token)
            .await
            .expect("authenticate")
            .expect("live session");
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.username, "jane");
        assert_eq!(user.email, "jane@example.com");

        assert!(sessions.revoke(user.session_id).await.expect("revoke"));
        assert!(sessions.authenticate(&token).await.expect("auth").is_none());
        assert!(!sessions.revoke(user.session_id).await.expect("revoke"));
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_removed() {
        let pool = test_pool().await;
        let user_id = insert_user(&pool, "joe", "joe@example.com").await;
        let sessions = SessionService::new(pool.clone(), Duration::from_secs(60));
        let token = sessions.issue(user_id).await.expect("issue");

        sqlx::query("UPDATE sessions SET expires_at = ?")
            .bind(Utc::now().timestamp() - 1)
            .execute(&pool)
            .await
            .expect("expire");

        assert!(sessions.authenticate(&token).await.expect("auth").is_none());

        let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let pool = test_pool().await;
        let sessions = SessionService::new(pool, Duration::from_secs(60));
        assert!(sessions
            .authenticate("deadbeef")
            .await
            .expect("auth")
            .is_none());
    }
}
