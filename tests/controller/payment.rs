//! Tests for the premium payment flow from invoice to webhook confirmation.

use entity::payment::PaymentStatus;
use starling::model::payment::{InvoiceDto, PaymentDto};
use starling_test_utils::constant::TEST_INVOICE_URL;

use super::*;

/// Expect an invoice to be created, approved at checkout and confirmed by the webhook,
/// leaving the post premium and the payment succeeded
#[tokio::test]
async fn premium_payment_flow() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_invoice_link_endpoint(1)
        .with_answer_pre_checkout_endpoint(true, 1)
        .with_send_message_endpoint(1)
        .build()
        .await?;
    let router = test.router();
    let init_data = telegram_factory::mock_init_data(TEST_USER_ID);
    let auth = format!("tma {}", init_data);

    let resp = send(
        &router,
        json_request(
            "POST",
            "/api/posts/1/premium",
            &[("authorization", auth.as_str())],
            &json!({ "star_amount": 5 }),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let invoice: InvoiceDto = body_json(resp).await;
    assert_eq!(invoice.invoice_url, TEST_INVOICE_URL);
    assert_eq!(invoice.star_amount, 5);

    let payment = test.payment().get_payment(&invoice.payment_id).await?.unwrap();
    assert_eq!(payment.status, PaymentStatus::Created);

    let pre_checkout = telegram_factory::mock_pre_checkout_update(
        "query-1",
        TEST_USER_ID,
        &payment.invoice_payload,
        5,
    );
    let resp = send(
        &router,
        json_request("POST", "/api/telegram/webhook", &[], &pre_checkout),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let successful = telegram_factory::mock_successful_payment_update(
        TEST_USER_ID,
        &payment.invoice_payload,
        5,
        "charge-1",
    );
    let resp = send(
        &router,
        json_request("POST", "/api/telegram/webhook", &[], &successful),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&router, tma_request("GET", "/api/payments", &init_data)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let payments: Vec<PaymentDto> = body_json(resp).await;
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].id, invoice.payment_id);
    assert_eq!(payments[0].status, PaymentStatus::Succeeded);

    let post = test.payment().get_post(1).await?.unwrap();
    assert!(post.is_premium());
    assert!(!post.payment_pending);

    test.assert_mocks();

    Ok(())
}

/// Expect 400 `invalid_star_amount` without creating an invoice
#[tokio::test]
async fn rejects_star_amount_out_of_range() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_invoice_link_endpoint(0)
        .build()
        .await?;
    let router = test.router();
    let auth = format!("tma {}", telegram_factory::mock_init_data(TEST_USER_ID));

    for star_amount in [0, 11] {
        let resp = send(
            &router,
            json_request(
                "POST",
                "/api/posts/1/premium",
                &[("authorization", auth.as_str())],
                &json!({ "star_amount": star_amount }),
            ),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: ErrorDto = body_json(resp).await;
        assert_eq!(error.code.as_deref(), Some("invalid_star_amount"));
    }

    test.assert_mocks();

    Ok(())
}

/// Expect 403 when paying for another user's post
#[tokio::test]
async fn rejects_post_of_other_user() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_ADMIN_USER_ID)
        .with_invoice_link_endpoint(0)
        .build()
        .await?;
    let router = test.router();
    let auth = format!("tma {}", telegram_factory::mock_init_data(TEST_USER_ID));

    let resp = send(
        &router,
        json_request(
            "POST",
            "/api/posts/1/premium",
            &[("authorization", auth.as_str())],
            &json!({ "star_amount": 3 }),
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    test.assert_mocks();

    Ok(())
}

/// Expect 409 `payment_pending` while an earlier invoice for the post is unpaid
#[tokio::test]
async fn rejects_second_invoice_while_pending() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_invoice_link_endpoint(1)
        .build()
        .await?;
    let router = test.router();
    let auth = format!("tma {}", telegram_factory::mock_init_data(TEST_USER_ID));
    let request = || {
        json_request(
            "POST",
            "/api/posts/1/premium",
            &[("authorization", auth.as_str())],
            &json!({ "star_amount": 2 }),
        )
    };

    let resp = send(&router, request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(&router, request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.code.as_deref(), Some("payment_pending"));

    test.assert_mocks();

    Ok(())
}

/// Expect 502 `provider_error` when Telegram fails to create the invoice
#[tokio::test]
async fn invoice_failure_returns_bad_gateway() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .build()
        .await?;
    let mock = test
        .telegram()
        .create_api_error_endpoint("createInvoiceLink", 400, "Bad Request: STARS_INVALID", 1);
    let router = test.router();
    let auth = format!("tma {}", telegram_factory::mock_init_data(TEST_USER_ID));

    let resp = send(
        &router,
        json_request(
            "POST",
            "/api/posts/1/premium",
            &[("authorization", auth.as_str())],
            &json!({ "star_amount": 4 }),
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.code.as_deref(), Some("provider_error"));
    mock.assert();

    Ok(())
}
