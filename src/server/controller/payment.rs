use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        payment::{CreatePaymentDto, InvoiceDto, PaymentDto},
    },
    server::{
        controller::util::auth::AuthSession, error::Error, model::app::AppState,
        service::payment::PaymentService,
    },
};

pub static PAYMENT_TAG: &str = "payment";

/// Buy premium status for one of your posts
///
/// Creates a payment and returns the Telegram Stars invoice link to open in the Mini App.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/premium",
    tag = PAYMENT_TAG,
    params(("post_id" = i32, Path, description = "ID of the post to make premium")),
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Invoice created", body = InvoiceDto),
        (status = 400, description = "Star amount outside 1 to 10", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Post belongs to another user", body = ErrorDto),
        (status = 404, description = "Post not found", body = ErrorDto),
        (status = 409, description = "Post is already premium or has a pending payment", body = ErrorDto),
        (status = 502, description = "Telegram could not create the invoice", body = ErrorDto)
    ),
)]
pub async fn create_premium_payment(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    Path(post_id): Path<i32>,
    Json(dto): Json<CreatePaymentDto>,
) -> Result<impl IntoResponse, Error> {
    let payment_service = PaymentService::new(&state.db, &state.telegram_client);

    payment_service
        .ensure_post_payable(session.telegram_id, post_id)
        .await?;

    let (payment, invoice_url) = payment_service
        .create_payment(session.telegram_id, post_id, dto.star_amount)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(InvoiceDto {
            payment_id: payment.id,
            invoice_url,
            star_amount: payment.star_amount,
        }),
    ))
}

/// List your payments, newest first
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = PAYMENT_TAG,
    responses(
        (status = 200, description = "Payments of the current user", body = Vec<PaymentDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn list_payments(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<impl IntoResponse, Error> {
    let payments: Vec<PaymentDto> = PaymentService::new(&state.db, &state.telegram_client)
        .list_user_payments(session.telegram_id)
        .await?
        .into_iter()
        .map(PaymentDto::from)
        .collect();

    Ok((StatusCode::OK, Json(payments)))
}
