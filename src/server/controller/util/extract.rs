//! Credential extraction from request headers and query strings.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use url::form_urlencoded;

pub const SESSION_ID_HEADER: &str = "x-session-id";
pub const INIT_DATA_HEADER: &str = "x-telegram-init-data";
pub const WEBHOOK_SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

fn header_str<'a>(headers: &'a HeaderMap, name: impl axum::http::header::AsHeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Strip a case-insensitive authorization scheme, returning the credentials.
fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    let (prefix, rest) = value.split_once(' ')?;
    prefix
        .eq_ignore_ascii_case(scheme)
        .then(|| rest.trim())
        .filter(|rest| !rest.is_empty())
}

/// Session token sent with the request.
///
/// Checked in order: `Authorization: Bearer <t>`, `Authorization: Session <t>`,
/// `X-Session-ID: <t>`, then a bare `Authorization` value. `Authorization: tma ...`
/// carries init data and is never read as a token.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let authorization = header_str(headers, AUTHORIZATION);

    if let Some(value) = authorization {
        if let Some(token) = strip_scheme(value, "Bearer").or_else(|| strip_scheme(value, "Session")) {
            return Some(token.to_string());
        }
    }

    if let Some(token) = header_str(headers, SESSION_ID_HEADER) {
        return Some(token.to_string());
    }

    authorization
        .filter(|value| strip_scheme(value, "tma").is_none() && !value.contains(' '))
        .map(str::to_string)
}

/// Raw init data sent with the request.
///
/// Checked in order: `Authorization: tma <data>`, `X-Telegram-Init-Data`, then the
/// `initData` query parameter.
pub fn extract_init_data(headers: &HeaderMap, query: Option<&str>) -> Option<String> {
    if let Some(init_data) = header_str(headers, AUTHORIZATION).and_then(|v| strip_scheme(v, "tma")) {
        return Some(init_data.to_string());
    }

    if let Some(init_data) = header_str(headers, INIT_DATA_HEADER) {
        return Some(init_data.to_string());
    }

    query.and_then(|query| {
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "initData")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    })
}
