use std::time::Duration;

use crate::server::error::config::ConfigError;

const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
const DEFAULT_INIT_DATA_MAX_AGE_SECS: u64 = 3600;
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

pub struct Config {
    pub bot_token: String,
    pub database_url: String,
    pub valkey_url: String,
    /// Raw `ADMIN_USER_ID`, validated by the admin authorizer so that a malformed value
    /// disables admin access instead of stopping the server
    pub admin_user_id: Option<String>,
    pub telegram_api_url: String,
    pub webhook_secret: Option<String>,
    pub session_ttl: Duration,
    pub init_data_max_age: Duration,
    pub listen_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
        };
        let optional = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let secs = |var: &str, default: u64| -> Result<Duration, ConfigError> {
            match optional(var) {
                None => Ok(Duration::from_secs(default)),
                Some(value) => match value.trim().parse::<u64>() {
                    Ok(0) => Err(ConfigError::InvalidEnvValue {
                        var: var.to_string(),
                        reason: "must be greater than zero".to_string(),
                    }),
                    Ok(secs) => Ok(Duration::from_secs(secs)),
                    Err(e) => Err(ConfigError::InvalidEnvValue {
                        var: var.to_string(),
                        reason: e.to_string(),
                    }),
                },
            }
        };

        Ok(Self {
            bot_token: required("BOT_TOKEN")?,
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            admin_user_id: optional("ADMIN_USER_ID"),
            telegram_api_url: optional("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            webhook_secret: optional("WEBHOOK_SECRET"),
            session_ttl: secs("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            init_data_max_age: secs("INIT_DATA_MAX_AGE_SECS", DEFAULT_INIT_DATA_MAX_AGE_SECS)?,
            listen_addr: optional("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
        })
    }
}
