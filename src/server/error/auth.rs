use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Init data is missing")]
    MissingInitData,
    #[error("Invalid init data: {0}")]
    InvalidInitData(String),
    #[error("Init data has expired")]
    ExpiredInitData,
    #[error("No session token or init data was provided")]
    NoAuthData,
    #[error("Session is invalid or has expired")]
    SessionExpired,
    #[error("Init data validation failed: {0}")]
    InitDataValidationFailed(String),
    #[error("Admin privileges are required")]
    Forbidden,
    #[error("Webhook secret token mismatch")]
    InvalidWebhookSecret,
}

impl AuthError {
    /// Machine readable reason sent to the client.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingInitData => "missing_init_data",
            Self::InvalidInitData(_) => "invalid_init_data",
            Self::ExpiredInitData => "expired_init_data",
            Self::NoAuthData => "no_auth_data",
            Self::SessionExpired => "session_expired",
            Self::InitDataValidationFailed(_) => "initdata_validation_failed",
            Self::Forbidden => "forbidden",
            Self::InvalidWebhookSecret => "invalid_webhook_secret",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(code = self.code(), "{}", self);

        let status = match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        };

        (
            status,
            Json(ErrorDto::with_code(self.to_string(), self.code())),
        )
            .into_response()
    }
}
