use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Star amount must be between 1 and 10, got {0}")]
    InvalidStarAmount(i32),
    #[error("Payment {0:?} not found")]
    PaymentNotFound(String),
    #[error("Post {0} not found")]
    PostNotFound(i32),
    #[error("Post {0} belongs to another user")]
    PostNotOwned(i32),
    #[error("Post {0} is already premium")]
    PostAlreadyPremium(i32),
    #[error("Post {0} already has a pending payment")]
    PaymentAlreadyPending(i32),
    #[error("Payment is not eligible for a refund: {0}")]
    RefundNotEligible(String),
}

impl PaymentError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidStarAmount(_) => "invalid_star_amount",
            Self::PaymentNotFound(_) => "payment_not_found",
            Self::PostNotFound(_) => "post_not_found",
            Self::PostNotOwned(_) => "forbidden",
            Self::PostAlreadyPremium(_) => "already_premium",
            Self::PaymentAlreadyPending(_) => "payment_pending",
            Self::RefundNotEligible(_) => "refund_not_eligible",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidStarAmount(_) | Self::RefundNotEligible(_) => StatusCode::BAD_REQUEST,
            Self::PaymentNotFound(_) | Self::PostNotFound(_) => StatusCode::NOT_FOUND,
            Self::PostNotOwned(_) => StatusCode::FORBIDDEN,
            Self::PostAlreadyPremium(_) | Self::PaymentAlreadyPending(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        tracing::debug!(code = self.code(), "{}", self);

        (
            self.status(),
            Json(ErrorDto::with_code(self.to_string(), self.code())),
        )
            .into_response()
    }
}
