//! Tests for administrator routes.

use entity::payment::PaymentStatus;
use starling::model::payment::{PaymentDto, ReconciliationSummary, StarBalanceDto};

use super::*;

/// Expect 403 `forbidden` for an authenticated user who is not the administrator
#[tokio::test]
async fn rejects_non_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let router = test.router();

    let init_data = telegram_factory::mock_init_data(TEST_USER_ID);
    let resp = send(&router, tma_request("GET", "/api/admin/stars/balance", &init_data)).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.code.as_deref(), Some("forbidden"));

    Ok(())
}

/// Expect 401 rather than 403 when the request is not authenticated at all
#[tokio::test]
async fn rejects_anonymous_before_role_check() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let router = test.router();

    let resp = send(
        &router,
        bearer_request("POST", "/api/admin/payments/reconcile", "unknown"),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect the balance to be fetched once and then served from the cache until cleared
#[tokio::test]
async fn star_balance_is_cached_until_cleared() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_star_balance_endpoint(1500, 2)
        .build()
        .await?;
    let router = test.router();
    let init_data = telegram_factory::mock_init_data(TEST_ADMIN_USER_ID);

    for _ in 0..2 {
        let resp = send(&router, tma_request("GET", "/api/admin/stars/balance", &init_data)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let balance: StarBalanceDto = body_json(resp).await;
        assert_eq!(balance.balance, 1500);
        assert!(balance.expires_at > balance.cached_at);
    }

    let resp = send(
        &router,
        tma_request("DELETE", "/api/admin/stars/balance", &init_data),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&router, tma_request("GET", "/api/admin/stars/balance", &init_data)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    test.assert_mocks();

    Ok(())
}

/// Expect an admin refund to mark the payment refunded and notify the buyer
#[tokio::test]
async fn refunds_payment() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_mock_payment(entity::payment::Model {
            telegram_payment_charge_id: Some("charge-1".to_string()),
            ..payment_factory::mock_payment("p1", 1, TEST_USER_ID, 5, PaymentStatus::Succeeded)
        })
        .with_refund_endpoint(1)
        .with_send_message_endpoint(1)
        .build()
        .await?;
    let router = test.router();
    let init_data = telegram_factory::mock_init_data(TEST_ADMIN_USER_ID);

    let resp = send(
        &router,
        tma_request("POST", "/api/admin/payments/p1/refund", &init_data),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let payment: PaymentDto = body_json(resp).await;
    assert_eq!(payment.status, PaymentStatus::Refunded);

    let stored = test.payment().get_payment("p1").await?.unwrap();
    assert_eq!(stored.status, PaymentStatus::Refunded);
    test.assert_mocks();

    Ok(())
}

/// Expect 400 `refund_not_eligible` without calling Telegram for an unpaid payment
#[tokio::test]
async fn refund_rejects_ineligible_payment() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_mock_payment(payment_factory::mock_payment(
            "p1",
            1,
            TEST_USER_ID,
            5,
            PaymentStatus::Pending,
        ))
        .with_refund_endpoint(0)
        .build()
        .await?;
    let router = test.router();
    let init_data = telegram_factory::mock_init_data(TEST_ADMIN_USER_ID);

    let resp = send(
        &router,
        tma_request("POST", "/api/admin/payments/p1/refund", &init_data),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDto = body_json(resp).await;
    assert_eq!(error.code.as_deref(), Some("refund_not_eligible"));
    test.assert_mocks();

    Ok(())
}

/// Expect 404 `payment_not_found` for an unknown payment
#[tokio::test]
async fn refund_unknown_payment() -> Result<(), TestError> {
    let test = TestBuilder::new().with_payment_tables().build().await?;
    let router = test.router();
    let init_data = telegram_factory::mock_init_data(TEST_ADMIN_USER_ID);

    let resp = send(
        &router,
        tma_request("POST", "/api/admin/payments/missing/refund", &init_data),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect the reconciliation summary to report a refund found in Telegram's log
#[tokio::test]
async fn reconcile_reports_summary() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_mock_payment(entity::payment::Model {
            telegram_payment_charge_id: Some("c1".to_string()),
            ..payment_factory::mock_payment("p1", 1, TEST_USER_ID, 5, PaymentStatus::Succeeded)
        })
        .with_star_transactions_endpoint(
            0,
            vec![telegram_factory::mock_refund_transaction("c1", -5, TEST_USER_ID)],
            1,
        )
        .build()
        .await?;
    let router = test.router();
    let init_data = telegram_factory::mock_init_data(TEST_ADMIN_USER_ID);

    let resp = send(
        &router,
        tma_request("POST", "/api/admin/payments/reconcile", &init_data),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let summary: ReconciliationSummary = body_json(resp).await;
    assert_eq!(summary.counts.updated, 1);
    assert_eq!(summary.updated[0].payment_id, "p1");
    assert_eq!(summary.updated[0].new_status, PaymentStatus::Refunded);
    assert!(!summary.possibly_incomplete);

    Ok(())
}
