use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Mutex;

use crate::core::database::run_migrations;
use crate::modules::mail::{MailError, Mailer, OutgoingEmail};

/// Fresh in-memory database with all migrations applied.
///
/// A single never-recycled connection keeps the in-memory database alive
/// for the lifetime of the pool.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory sqlite pool");

    run_migrations(&pool).await.expect("migrations");
    pool
}

/// Insert a bare user row and return its id
pub async fn insert_user(pool: &SqlitePool, username: &str, email: &str) -> i64 {
    sqlx::query(
        "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind("not-a-real-hash")
    .bind(Utc::now())
    .execute(pool)
    .await
    .expect("insert user")
    .last_insert_rowid()
}

/// Mailer that keeps every message in memory
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().expect("mailer lock").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().expect("mailer lock").push(email.clone());
        Ok(())
    }
}
