use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        auth::{SessionDto, TelegramAuthDto},
    },
    server::{
        controller::util::{auth::AuthSession, extract::extract_init_data},
        error::{auth::AuthError, Error},
        model::app::AppState,
        service::auth::{init_data::InitDataVerifier, session::SessionService},
    },
};

pub static AUTH_TAG: &str = "auth";

/// Log in with Telegram Mini App init data
///
/// Init data is read from the request body, `Authorization: tma <data>`, the
/// `X-Telegram-Init-Data` header or the `initData` query parameter, in that order.
#[utoipa::path(
    post,
    path = "/api/auth/telegram",
    tag = AUTH_TAG,
    request_body(content = TelegramAuthDto, description = "Init data, optional when sent in a header"),
    responses(
        (status = 200, description = "Session created", body = SessionDto),
        (status = 401, description = "Init data missing, invalid or expired", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn telegram_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    let dto: TelegramAuthDto = if body.is_empty() {
        TelegramAuthDto::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|_| AuthError::InvalidInitData("malformed request body".to_string()))?
    };

    let init_data = dto
        .init_data
        .filter(|init_data| !init_data.trim().is_empty())
        .or_else(|| extract_init_data(&headers, query.as_deref()))
        .ok_or(AuthError::MissingInitData)?;

    let identity = InitDataVerifier::new(&state.auth.bot_token, state.auth.init_data_max_age)
        .verify(&init_data)?;

    let session = SessionService::new(&state.store, &state.auth.admin, state.auth.session_ttl)
        .create(&identity)
        .await?;

    tracing::info!(telegram_id = session.telegram_id, "User logged in");

    Ok((StatusCode::OK, Json(SessionDto::from(session))))
}

/// Get the current session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current session", body = SessionDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn get_session(AuthSession(session): AuthSession) -> Result<impl IntoResponse, Error> {
    Ok((StatusCode::OK, Json(SessionDto::from(session))))
}

/// Extend the current session by a full TTL
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Session extended", body = SessionDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn refresh_session(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<impl IntoResponse, Error> {
    let session = SessionService::new(&state.store, &state.auth.admin, state.auth.session_ttl)
        .refresh(&session.token)
        .await?
        .ok_or(AuthError::SessionExpired)?;

    Ok((StatusCode::OK, Json(SessionDto::from(session))))
}

/// Log out by invalidating the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Session invalidated"),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<impl IntoResponse, Error> {
    SessionService::new(&state.store, &state.auth.admin, state.auth.session_ttl)
        .invalidate(&session.token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
