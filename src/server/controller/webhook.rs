use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use telegram::model::Update;

use crate::{
    model::api::ErrorDto,
    server::{
        controller::util::extract::WEBHOOK_SECRET_HEADER,
        error::{auth::AuthError, Error},
        model::app::AppState,
        service::payment::webhook::WebhookService,
    },
};

pub static WEBHOOK_TAG: &str = "webhook";

/// Receive updates from Telegram
///
/// Handles pre-checkout queries and successful and refunded payments. When a webhook
/// secret is configured, the `X-Telegram-Bot-Api-Secret-Token` header must match it.
#[utoipa::path(
    post,
    path = "/api/telegram/webhook",
    tag = WEBHOOK_TAG,
    request_body(content = Object, description = "Telegram update"),
    responses(
        (status = 200, description = "Update processed"),
        (status = 401, description = "Secret token mismatch", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn telegram_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> Result<impl IntoResponse, Error> {
    if let Some(expected) = &state.auth.webhook_secret {
        let provided = headers
            .get(WEBHOOK_SECRET_HEADER)
            .and_then(|value| value.to_str().ok());

        if provided != Some(expected.as_str()) {
            return Err(AuthError::InvalidWebhookSecret.into());
        }
    }

    let outcome = WebhookService::new(&state.db, &state.telegram_client)
        .handle_update(&update)
        .await?;

    tracing::debug!(update_id = update.update_id, ?outcome, "Processed Telegram update");

    Ok(StatusCode::OK)
}
