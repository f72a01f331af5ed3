use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        payment::{PaymentDto, ReconciliationSummary, StarBalanceDto},
    },
    server::{
        controller::util::auth::AdminSession,
        error::Error,
        model::app::AppState,
        service::payment::{
            balance::BalanceService, reconcile::ReconciliationService, PaymentService,
        },
    },
};

pub static ADMIN_TAG: &str = "admin";

/// Refund a payment and revoke the post's premium status
#[utoipa::path(
    post,
    path = "/api/admin/payments/{payment_id}/refund",
    tag = ADMIN_TAG,
    params(("payment_id" = String, Path, description = "ID of the payment to refund")),
    responses(
        (status = 200, description = "Payment refunded", body = PaymentDto),
        (status = 400, description = "Payment is not eligible for a refund", body = ErrorDto),
        (status = 403, description = "Admin privileges required", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 502, description = "Telegram rejected or failed the refund", body = ErrorDto)
    ),
)]
pub async fn refund_payment(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Path(payment_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    tracing::info!(
        admin_id = session.telegram_id,
        payment_id = %payment_id,
        "Admin requested refund"
    );

    let payment = PaymentService::new(&state.db, &state.telegram_client)
        .refund_and_revoke(&payment_id)
        .await?;

    Ok((StatusCode::OK, Json(PaymentDto::from(payment))))
}

/// Reconcile recent payments against Telegram's transaction log
#[utoipa::path(
    post,
    path = "/api/admin/payments/reconcile",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Reconciliation summary", body = ReconciliationSummary),
        (status = 403, description = "Admin privileges required", body = ErrorDto),
        (status = 502, description = "Transactions could not be fetched", body = ErrorDto)
    ),
)]
pub async fn reconcile_payments(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<impl IntoResponse, Error> {
    let summary = ReconciliationService::new(&state.db, &state.telegram_client)
        .reconcile()
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

/// Get the bot's Telegram Stars balance, cached for 5 minutes
#[utoipa::path(
    get,
    path = "/api/admin/stars/balance",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Star balance", body = StarBalanceDto),
        (status = 403, description = "Admin privileges required", body = ErrorDto),
        (status = 502, description = "Balance could not be fetched", body = ErrorDto)
    ),
)]
pub async fn get_star_balance(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<impl IntoResponse, Error> {
    let balance = BalanceService::new(&state.store, &state.telegram_client)
        .get_balance()
        .await?;

    Ok((StatusCode::OK, Json(StarBalanceDto::from(balance))))
}

/// Clear the cached star balance
#[utoipa::path(
    delete,
    path = "/api/admin/stars/balance",
    tag = ADMIN_TAG,
    responses(
        (status = 204, description = "Cache cleared"),
        (status = 403, description = "Admin privileges required", body = ErrorDto)
    ),
)]
pub async fn clear_star_balance(
    State(state): State<AppState>,
    _admin: AdminSession,
) -> Result<impl IntoResponse, Error> {
    BalanceService::new(&state.store, &state.telegram_client)
        .clear_balance_cache()
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
