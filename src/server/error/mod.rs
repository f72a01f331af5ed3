//! Error types for the Starling server.
//!
//! Domain errors (authentication, configuration, payments) are `thiserror` enums that
//! implement `IntoResponse` themselves; the aggregate [`Error`] wraps them together
//! with the errors of external libraries so `?` works everywhere.

pub mod auth;
pub mod config;
pub mod payment;
pub mod retry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, payment::PaymentError},
};

/// Main error type for the Starling server.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization failure.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Payment ledger rule violation.
    #[error(transparent)]
    PaymentError(#[from] PaymentError),
    /// Telegram Bot API error (transport, HTTP status or `ok: false` response).
    #[error(transparent)]
    TelegramError(#[from] telegram::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Redis/Valkey error (connection, command execution).
    #[error(transparent)]
    RedisError(#[from] fred::error::Error),
    /// JSON (de)serialization error.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// I/O error (binding the listener, serving connections).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Whether the Bot API rejected a refund because the charge was already refunded.
    pub fn is_already_refunded(&self) -> bool {
        match self {
            Self::TelegramError(e) => e
                .description()
                .is_some_and(|d| d.to_ascii_uppercase().contains("ALREADY_REFUNDED")),
            _ => false,
        }
    }
}

/// Maps domain errors to their own responses, Bot API failures to 502 and everything
/// else to a logged 500.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::PaymentError(err) => err.into_response(),
            Self::TelegramError(err) => {
                tracing::error!(error = %err, "Telegram Bot API request failed");

                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto::with_code(
                        "Telegram is unavailable, please try again later",
                        "provider_error",
                    )),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 Internal Server Error.
///
/// The error is logged; the client only sees a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("Internal server error")),
        )
            .into_response()
    }
}

#[cfg(test)]
impl From<Error> for starling_test_utils::TestError {
    fn from(err: Error) -> Self {
        Self::Other(Box::new(err))
    }
}
