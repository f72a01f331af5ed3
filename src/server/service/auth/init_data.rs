//! Verification of Telegram Mini App init data.
//!
//! Init data is a URL-encoded set of fields signed by Telegram with a key derived from
//! the bot token. The data check string is every field except `hash`, sorted by key and
//! joined as `key=value` lines; the signature is
//! `HMAC_SHA256(HMAC_SHA256("WebAppData", bot_token), data_check_string)` in lowercase hex.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::{form_urlencoded, Url};

use crate::server::{error::auth::AuthError, model::auth::TelegramIdentity};

type HmacSha256 = Hmac<Sha256>;

const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";

pub struct InitDataVerifier<'a> {
    bot_token: &'a str,
    max_age: Duration,
}

impl<'a> InitDataVerifier<'a> {
    pub fn new(bot_token: &'a str, max_age: Duration) -> Self {
        Self { bot_token, max_age }
    }

    /// Verify `raw` against the current time.
    pub fn verify(&self, raw: &str) -> Result<TelegramIdentity, AuthError> {
        self.verify_at(raw, Utc::now())
    }

    /// Verify `raw` as of `now`.
    ///
    /// The signature is checked first, then `auth_date`, and only then is the `user`
    /// field parsed, so unsigned input never reaches the JSON parser.
    ///
    /// # Returns
    /// - `Ok(TelegramIdentity)` - Signed, fresh and well formed
    /// - `Err(AuthError::MissingInitData)` - Empty input
    /// - `Err(AuthError::InvalidInitData)` - Bad signature or malformed fields
    /// - `Err(AuthError::ExpiredInitData)` - `auth_date` older than the max age
    pub fn verify_at(&self, raw: &str, now: DateTime<Utc>) -> Result<TelegramIdentity, AuthError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(AuthError::MissingInitData);
        }

        let mut hash = None;
        let mut fields: Vec<(String, String)> = Vec::new();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()).into_owned() {
            if key == "hash" {
                hash = Some(value);
            } else {
                fields.push((key, value));
            }
        }

        let hash = hash.ok_or_else(|| invalid("missing hash"))?;
        fields.sort();

        self.verify_signature(&fields, &hash)?;

        if let Some((_, auth_date)) = fields.iter().find(|(key, _)| key == "auth_date") {
            let auth_date: i64 = auth_date
                .parse()
                .map_err(|_| invalid("invalid auth_date"))?;
            let age = now.timestamp().saturating_sub(auth_date);
            if age > self.max_age.as_secs() as i64 {
                return Err(AuthError::ExpiredInitData);
            }
        }

        let user = fields
            .iter()
            .find(|(key, _)| key == "user")
            .map(|(_, value)| value.as_str())
            .ok_or_else(|| invalid("missing user"))?;

        let identity: TelegramIdentity = serde_json::from_str(user)
            .map_err(|e| AuthError::InvalidInitData(format!("invalid user: {}", e)))?;
        validate_identity(&identity)?;

        Ok(identity)
    }

    fn verify_signature(&self, sorted_fields: &[(String, String)], hash: &str) -> Result<(), AuthError> {
        if hash.len() != 64 || !hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(invalid("malformed hash"));
        }
        let expected = hex::decode(hash).map_err(|_| invalid("malformed hash"))?;

        let data_check_string = sorted_fields
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("\n");

        let mut secret = HmacSha256::new_from_slice(WEB_APP_DATA_KEY)
            .map_err(|_| invalid("signing key rejected"))?;
        secret.update(self.bot_token.as_bytes());
        let secret_key = secret.finalize().into_bytes();

        let mut mac = HmacSha256::new_from_slice(&secret_key)
            .map_err(|_| invalid("signing key rejected"))?;
        mac.update(data_check_string.as_bytes());

        // Constant time comparison
        mac.verify_slice(&expected)
            .map_err(|_| invalid("signature mismatch"))
    }
}

fn invalid(reason: &str) -> AuthError {
    AuthError::InvalidInitData(reason.to_string())
}

fn validate_identity(identity: &TelegramIdentity) -> Result<(), AuthError> {
    if identity.id <= 0 {
        return Err(invalid("user id must be positive"));
    }
    if identity.first_name.trim().is_empty() {
        return Err(invalid("first_name is required"));
    }
    if identity.language_code.len() != 2
        || !identity
            .language_code
            .bytes()
            .all(|b| b.is_ascii_alphabetic())
    {
        return Err(invalid("language_code must be two letters"));
    }
    if let Some(username) = &identity.username {
        let valid = (5..=32).contains(&username.len())
            && username
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_');
        if !valid {
            return Err(invalid("invalid username"));
        }
    }
    if let Some(photo_url) = &identity.photo_url {
        let valid = Url::parse(photo_url)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            return Err(invalid("invalid photo_url"));
        }
    }

    Ok(())
}
