//! Tests for the telegram_login endpoint.

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderMap, HeaderValue},
    response::IntoResponse,
};
use chrono::Utc;
use starling::{
    model::auth::{Role, SessionDto},
    server::{
        controller::auth::telegram_login,
        error::{auth::AuthError, Error},
    },
};

use super::*;

fn body(init_data: &str) -> Result<Bytes, TestError> {
    Ok(Bytes::from(serde_json::to_vec(&json!({ "initData": init_data }))?))
}

/// Expect 200 with a user session when init data is sent in the body
#[tokio::test]
async fn login_with_init_data_in_body() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let init_data = telegram_factory::mock_init_data(TEST_USER_ID);

    let result = telegram_login(
        State(test.to_app_state()),
        HeaderMap::new(),
        RawQuery(None),
        body(&init_data)?,
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let session: SessionDto = body_json(resp).await;
    assert_eq!(session.telegram_id, TEST_USER_ID);
    assert_eq!(session.user_id, TEST_USER_ID.to_string());
    assert_eq!(session.username.as_deref(), Some("test_user"));
    assert_eq!(session.display_name, "Test User");
    assert_eq!(session.role, Role::User);
    assert!(session.expires_at > session.created_at);

    Ok(())
}

/// Expect init data in an `Authorization: tma` header to be accepted with no body
#[tokio::test]
async fn login_with_tma_header() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let init_data = telegram_factory::mock_init_data(TEST_USER_ID);

    let mut headers = HeaderMap::new();
    headers.insert(
        "authorization",
        HeaderValue::from_str(&format!("tma {}", init_data)).unwrap(),
    );

    let result = telegram_login(
        State(test.to_app_state()),
        headers,
        RawQuery(None),
        Bytes::new(),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}

/// Expect init data in the `initData` query parameter to be accepted
#[tokio::test]
async fn login_with_query_parameter() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let init_data = telegram_factory::mock_init_data(TEST_USER_ID);
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("initData", &init_data)
        .finish();

    let result = telegram_login(
        State(test.to_app_state()),
        HeaderMap::new(),
        RawQuery(Some(query)),
        Bytes::new(),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    Ok(())
}

/// Expect a blank body field to fall back to the init data header
#[tokio::test]
async fn login_blank_body_falls_back_to_header() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let init_data = telegram_factory::mock_init_data(TEST_USER_ID);

    let mut headers = HeaderMap::new();
    headers.insert(
        "x-telegram-init-data",
        HeaderValue::from_str(&init_data).unwrap(),
    );

    let result = telegram_login(
        State(test.to_app_state()),
        headers,
        RawQuery(None),
        body("  ")?,
    )
    .await;

    assert!(result.is_ok());

    Ok(())
}

/// Expect the configured administrator to receive the admin role
#[tokio::test]
async fn login_as_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let init_data = telegram_factory::mock_init_data(TEST_ADMIN_USER_ID);

    let result = telegram_login(
        State(test.to_app_state()),
        HeaderMap::new(),
        RawQuery(None),
        body(&init_data)?,
    )
    .await;

    let session: SessionDto = body_json(result.unwrap().into_response()).await;
    assert_eq!(session.role, Role::Admin);

    Ok(())
}

/// Expect MissingInitData when no init data is sent anywhere
#[tokio::test]
async fn login_without_init_data() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = telegram_login(
        State(test.to_app_state()),
        HeaderMap::new(),
        RawQuery(None),
        Bytes::new(),
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::MissingInitData))
    ));

    Ok(())
}

/// Expect 401 with `invalid_init_data` for init data signed with another bot token
#[tokio::test]
async fn login_with_foreign_signature() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let init_data = telegram_factory::sign_init_data(
        &[
            (
                "user",
                telegram_factory::mock_init_data_user(TEST_USER_ID).to_string(),
            ),
            ("auth_date", Utc::now().timestamp().to_string()),
        ],
        "987654321:some-other-bot",
    );

    let result = telegram_login(
        State(test.to_app_state()),
        HeaderMap::new(),
        RawQuery(None),
        body(&init_data)?,
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::InvalidInitData(_)))
    ));

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.code.as_deref(), Some("invalid_init_data"));

    Ok(())
}

/// Expect ExpiredInitData for correctly signed init data older than the maximum age
#[tokio::test]
async fn login_with_stale_init_data() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let init_data = telegram_factory::mock_init_data_for(
        &telegram_factory::mock_init_data_user(TEST_USER_ID),
        Utc::now().timestamp() - 7200,
    );

    let result = telegram_login(
        State(test.to_app_state()),
        HeaderMap::new(),
        RawQuery(None),
        body(&init_data)?,
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::ExpiredInitData))
    ));

    Ok(())
}

/// Expect InvalidInitData for a body that is not JSON
#[tokio::test]
async fn login_with_malformed_body() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = telegram_login(
        State(test.to_app_state()),
        HeaderMap::new(),
        RawQuery(None),
        Bytes::from_static(b"initData="),
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::AuthError(AuthError::InvalidInitData(_)))
    ));

    Ok(())
}
