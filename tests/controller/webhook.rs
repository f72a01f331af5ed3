//! Tests for the Telegram webhook endpoint.

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use entity::payment::PaymentStatus;
use starling::server::{
    controller::webhook::telegram_webhook,
    error::{auth::AuthError, Error},
};

use crate::util::TEST_WEBHOOK_SECRET;

use super::*;

fn secret_headers(secret: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-telegram-bot-api-secret-token", secret.parse().unwrap());
    headers
}

/// Expect InvalidWebhookSecret when the secret header is missing or wrong
#[tokio::test]
async fn rejects_wrong_secret() -> Result<(), TestError> {
    let test = TestBuilder::new().with_payment_tables().build().await?;
    let update = telegram_factory::mock_pre_checkout_update("q", TEST_USER_ID, "{}", 1);

    for headers in [HeaderMap::new(), secret_headers("guess")] {
        let result = telegram_webhook(
            State(test.to_app_state_with_webhook_secret()),
            headers,
            Json(update.clone()),
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::InvalidWebhookSecret))
        ));
    }

    Ok(())
}

/// Expect 200 and the update processed when the secret matches
#[tokio::test]
async fn accepts_matching_secret() -> Result<(), TestError> {
    let payment =
        payment_factory::mock_payment("p1", 1, TEST_USER_ID, 3, PaymentStatus::Created);
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_mock_payment(payment.clone())
        .with_answer_pre_checkout_endpoint(true, 1)
        .build()
        .await?;
    let update =
        telegram_factory::mock_pre_checkout_update("q", TEST_USER_ID, &payment.invoice_payload, 3);

    let result = telegram_webhook(
        State(test.to_app_state_with_webhook_secret()),
        secret_headers(TEST_WEBHOOK_SECRET),
        Json(update),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().into_response().status(), StatusCode::OK);

    let stored = test.payment().get_payment("p1").await?.unwrap();
    assert_eq!(stored.status, PaymentStatus::Pending);
    test.assert_mocks();

    Ok(())
}

/// Expect updates without payment content to be acknowledged with 200
#[tokio::test]
async fn acknowledges_unrelated_update() -> Result<(), TestError> {
    let test = TestBuilder::new().with_payment_tables().build().await?;
    let router = test.router();

    let update = json!({
        "update_id": 10,
        "message": {
            "message_id": 1,
            "date": 1_700_000_000,
            "chat": { "id": TEST_USER_ID, "type": "private" },
            "text": "/start",
        },
    });

    let resp = send(
        &router,
        json_request("POST", "/api/telegram/webhook", &[], &update),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect the OpenAPI document to describe the webhook's update body
#[tokio::test]
async fn documents_webhook_request_body() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let router = test.router();

    let resp = send(
        &router,
        axum::http::Request::builder()
            .uri("/api/docs/openapi.json")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let doc: serde_json::Value = body_json(resp).await;
    let request_body = &doc["paths"]["/api/telegram/webhook"]["post"]["requestBody"];
    assert_eq!(request_body["description"], "Telegram update");
    assert!(request_body["content"]["application/json"].is_object());

    Ok(())
}
