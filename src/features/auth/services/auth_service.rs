use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    normalize_email, AuthUserDto, LoginRequestDto, LoginResponseDto, SignupRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::models::User;
use crate::features::auth::services::password::{hash_password, verify_password};
use crate::features::auth::services::SessionService;
use crate::shared::validation::USERNAME_REGEX;

const DUPLICATE_ACCOUNT: &str = "User with this username or email already exists";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Account store: signup, login and logout over the `users` table
pub struct AuthService {
    pool: SqlitePool,
    sessions: Arc<SessionService>,
}

impl AuthService {
    pub fn new(pool: SqlitePool, sessions: Arc<SessionService>) -> Self {
        Self { pool, sessions }
    }

    /// Create an account. Username and email must both be unused.
    pub async fn signup(&self, dto: SignupRequestDto) -> Result<i64> {
        let username = dto.username.trim().to_string();
        let email = normalize_email(&dto.email);

        if !USERNAME_REGEX.is_match(&username) {
            return Err(AppError::Validation(
                "Username must start with a letter or underscore and contain only letters, digits, '_', '.' or '-'"
                    .to_string(),
            ));
        }

        let existing: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM users WHERE username = ? OR email = ? LIMIT 1")
                .bind(&username)
                .bind(&email)
                .fetch_optional(&self.pool)
                .await?;

        if existing.is_some() {
            warn!("Signup rejected, duplicate username or email: {}", username);
            return Err(AppError::Conflict(DUPLICATE_ACCOUNT.to_string()));
        }

        let password_hash = hash_password(dto.password).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&username)
        .bind(&email)
        .bind(&password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent signup for the same identity
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict(DUPLICATE_ACCOUNT.to_string())
            }
            other => AppError::Database(other),
        })?;

        let user_id = result.last_insert_rowid();
        info!("User created: id={}, username={}", user_id, username);
        Ok(user_id)
    }

    /// Verify credentials and open a session
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let email = normalize_email(&dto.email);

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let verified = verify_password(dto.password, stored_hash).await?;

        let user = match user {
            Some(user) if verified => user,
            _ => {
                warn!("Failed login attempt for {}", email);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        let token = self.sessions.issue(user.id).await?;
        info!("User logged in: id={}", user.id);

        Ok(LoginResponseDto {
            message: "Login successful".to_string(),
            token,
            user: AuthUserDto {
                username: user.username,
                email: user.email,
            },
        })
    }

    /// End the session the request was authenticated with
    pub async fn logout(&self, user: &AuthenticatedUser) -> Result<()> {
        if !self.sessions.revoke(user.session_id).await? {
            return Err(AppError::Unauthorized(
                "Authentication required".to_string(),
            ));
        }

        info!("User logged out: id={}", user.user_id);
        Ok(())
    }
}
