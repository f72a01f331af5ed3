use std::time::Duration;

use thiserror::Error;

/// Errors returned by the Bot API client.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport level failure (connection, timeout, TLS, body read).
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    /// The Bot API answered with `ok: false`.
    #[error("Telegram Bot API error {code} for {method}: {description}")]
    ApiError {
        method: String,
        code: u16,
        description: String,
        /// Seconds to wait before retrying, present on 429 responses.
        retry_after: Option<u64>,
    },
    /// Non-success HTTP status without a Bot API envelope in the body.
    #[error("Telegram Bot API returned HTTP {status} for {method}")]
    HttpError { method: String, status: u16 },
    /// Body could not be decoded into the expected result type.
    #[error("Failed to decode Telegram Bot API response for {method}: {source}")]
    DecodeError {
        method: String,
        #[source]
        source: serde_json::Error,
    },
    /// Client was built with missing or invalid settings.
    #[error("Invalid Telegram client configuration: {0}")]
    ConfigError(String),
}

impl Error {
    /// HTTP-equivalent status of the failure, if the Bot API produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::HttpError { status, .. } => Some(*status),
            Self::ReqwestError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Wait requested by the Bot API before the next call, set when rate limited.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::ApiError {
                retry_after: Some(secs),
                ..
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }

    /// Bot API error description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::ApiError { description, .. } => Some(description),
            _ => None,
        }
    }
}
