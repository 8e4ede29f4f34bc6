use sqlx::FromRow;

use crate::features::auth::model::AuthenticatedUser;

/// A session row joined with the owning account
#[derive(Debug, Clone, FromRow)]
pub struct SessionRecord {
    pub session_id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    /// Unix seconds
    pub expires_at: i64,
}

impl SessionRecord {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

impl From<SessionRecord> for AuthenticatedUser {
    fn from(record: SessionRecord) -> Self {
        Self {
            user_id: record.user_id,
            username: record.username,
            email: record.email,
            session_id: record.session_id,
        }
    }
}
