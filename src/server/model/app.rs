use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;

use crate::server::{service::auth::admin::AdminAuthorizer, store::KeyValueStore};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub telegram_client: telegram::Client,
    pub store: KeyValueStore,
    pub auth: Arc<AuthSettings>,
}

/// Authentication settings shared by every request.
pub struct AuthSettings {
    /// Bot token init data is signed with
    pub bot_token: String,
    pub session_ttl: Duration,
    pub init_data_max_age: Duration,
    pub admin: AdminAuthorizer,
    /// Expected `X-Telegram-Bot-Api-Secret-Token` on webhook requests, if set
    pub webhook_secret: Option<String>,
}
