//! Opaque bearer sessions kept in the key-value store.

use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;

use crate::server::{
    error::Error,
    model::{auth::TelegramIdentity, session::Session},
    service::auth::admin::AdminAuthorizer,
    store::KeyValueStore,
};

/// Longest token accepted for lookup; anything longer was not issued by us.
const MAX_TOKEN_LEN: usize = 128;

/// Store key of the session identified by `token`.
pub fn session_key(token: &str) -> String {
    format!("session:{}", token)
}

/// 32 random bytes, URL-safe base64 without padding.
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

fn is_well_formed_token(token: &str) -> bool {
    !token.is_empty()
        && token.len() <= MAX_TOKEN_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

pub struct SessionService<'a> {
    store: &'a KeyValueStore,
    admin: &'a AdminAuthorizer,
    ttl: Duration,
}

impl<'a> SessionService<'a> {
    pub fn new(store: &'a KeyValueStore, admin: &'a AdminAuthorizer, ttl: Duration) -> Self {
        Self { store, admin, ttl }
    }

    /// Issue a new session for a verified Telegram identity.
    pub async fn create(&self, identity: &TelegramIdentity) -> Result<Session, Error> {
        let now = Utc::now();
        let session = Session {
            token: generate_token(),
            user_id: identity.id.to_string(),
            telegram_id: identity.id,
            username: identity.username.clone(),
            display_name: identity.display_name(),
            photo_url: identity.photo_url.clone(),
            created_at: now,
            expires_at: now + self.chrono_ttl(),
            is_active: true,
            role: self.admin.role_for(identity.id),
        };

        self.write(&session).await?;

        tracing::debug!(
            telegram_id = session.telegram_id,
            role = ?session.role,
            "Created session"
        );

        Ok(session)
    }

    /// Session stored for `token`, if any.
    ///
    /// A value that no longer deserializes is deleted and treated as absent.
    pub async fn validate(&self, token: &str) -> Result<Option<Session>, Error> {
        if !is_well_formed_token(token) {
            return Ok(None);
        }

        let key = session_key(token);
        let Some(value) = self.store.get(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Session>(&value) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session");
                self.store.delete(&key).await?;
                Ok(None)
            }
        }
    }

    /// Extend the session for `token` by a full TTL.
    ///
    /// The new `expires_at` is always later than the previous one.
    pub async fn refresh(&self, token: &str) -> Result<Option<Session>, Error> {
        let Some(mut session) = self.validate(token).await? else {
            return Ok(None);
        };

        let extended = Utc::now() + self.chrono_ttl();
        let minimum = session.expires_at + chrono::Duration::milliseconds(1);
        session.expires_at = extended.max(minimum);

        self.write(&session).await?;

        Ok(Some(session))
    }

    /// Remove the session for `token`. Unknown tokens are ignored.
    pub async fn invalidate(&self, token: &str) -> Result<(), Error> {
        if !is_well_formed_token(token) {
            return Ok(());
        }

        self.store.delete(&session_key(token)).await
    }

    async fn write(&self, session: &Session) -> Result<(), Error> {
        let value = serde_json::to_string(session)?;
        self.store
            .put(&session_key(&session.token), &value, self.ttl)
            .await
    }

    fn chrono_ttl(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX)
    }
}
