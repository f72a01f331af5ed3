use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::auth::{Role, SessionDto};

/// Session as stored in the key-value store under `session:{token}`.
///
/// The store's TTL decides whether a session exists; `expires_at` mirrors it for
/// clients and is not checked on read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    /// Telegram user ID as a string
    pub user_id: String,
    /// Telegram user ID, kept numeric for comparisons
    pub telegram_id: i64,
    pub username: Option<String>,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user_id: session.user_id,
            telegram_id: session.telegram_id,
            username: session.username,
            display_name: session.display_name,
            photo_url: session.photo_url,
            role: session.role,
            created_at: session.created_at,
            expires_at: session.expires_at,
        }
    }
}
