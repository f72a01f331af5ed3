use std::{io::ErrorKind, time::Duration};

use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (timeouts, connection failures, 429, 5xx)
    Retry,
    /// Retry without backoff; surfaced if it persists on the final attempt
    Unclassified,
    /// Failed permanently (bad request, not found, already refunded)
    Fail,
}

/// Bot API descriptions that mean the request can never succeed.
const PERMANENT_DESCRIPTIONS: [&str; 3] =
    ["CHARGE_NOT_FOUND", "PAYMENT_NOT_FOUND", "ALREADY_REFUNDED"];

impl Error {
    /// Minimum wait before retrying, as requested by a rate limited Bot API answer
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::TelegramError(e) => e.retry_after(),
            _ => None,
        }
    }

    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::TelegramError(e) => telegram_retry_strategy(e),

            Self::DbErr(db_err) => match db_err {
                // Connection errors are transient
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                // Query, type conversion and record errors won't resolve with retry
                _ => ErrorRetryStrategy::Fail,
            },

            // Redis connection issues are transient
            Self::RedisError(_) => ErrorRetryStrategy::Retry,

            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::AuthError(_) => ErrorRetryStrategy::Fail,
            Self::PaymentError(_) => ErrorRetryStrategy::Fail,
            Self::JsonError(_) => ErrorRetryStrategy::Fail,
            Self::SchedulerError(_) => ErrorRetryStrategy::Fail,
            Self::IoError(_) => ErrorRetryStrategy::Fail,
        }
    }
}

fn telegram_retry_strategy(error: &telegram::Error) -> ErrorRetryStrategy {
    if let Some(description) = error.description() {
        let description = description.to_ascii_uppercase();
        if PERMANENT_DESCRIPTIONS
            .iter()
            .any(|marker| description.contains(marker))
        {
            return ErrorRetryStrategy::Fail;
        }
    }

    match error {
        telegram::Error::ReqwestError(e)
            if e.is_timeout() || e.is_connect() || is_connection_reset(e) =>
        {
            ErrorRetryStrategy::Retry
        }
        telegram::Error::DecodeError { .. } => ErrorRetryStrategy::Unclassified,
        telegram::Error::ConfigError(_) => ErrorRetryStrategy::Fail,
        _ => error
            .status()
            .map_or(ErrorRetryStrategy::Unclassified, status_retry_strategy),
    }
}

fn status_retry_strategy(status: u16) -> ErrorRetryStrategy {
    match status {
        429 => ErrorRetryStrategy::Retry,
        s if s >= 500 => ErrorRetryStrategy::Retry,
        // Invalid request, retrying sends the same invalid request
        s if (400..500).contains(&s) => ErrorRetryStrategy::Fail,
        _ => ErrorRetryStrategy::Unclassified,
    }
}

/// Walk the source chain looking for a reset or aborted connection.
fn is_connection_reset(error: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(error);

    while let Some(err) = source {
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            if matches!(
                io_err.kind(),
                ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe
            ) {
                return true;
            }
        }
        source = err.source();
    }

    false
}
