use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role granted to a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// Session as returned to the Mini App
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionDto {
    /// Bearer token to send as `Authorization: Bearer <token>`
    pub token: String,
    pub user_id: String,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Init data may be sent in the body instead of a header
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TelegramAuthDto {
    pub init_data: Option<String>,
}
