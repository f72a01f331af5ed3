use super::*;

/// Expect a new payment to be stored in the created state without charge IDs
#[tokio::test]
async fn creates_payment_in_created_state() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .build()
        .await?;

    let repo = PaymentRepository::new(&test.db);
    let payment = repo.create("p1", "{}", TEST_USER_ID, 1, 5).await?;

    assert_eq!(payment.id, "p1");
    assert_eq!(payment.status, PaymentStatus::Created);
    assert_eq!(payment.star_amount, 5);
    assert!(payment.telegram_payment_charge_id.is_none());

    let stored = repo.get_by_id("p1").await?;
    assert_eq!(stored, Some(payment));

    Ok(())
}

/// Expect Error when the payment table has not been created
#[tokio::test]
async fn fails_without_tables() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let repo = PaymentRepository::new(&test.db);
    let result = repo.create("p1", "{}", TEST_USER_ID, 1, 5).await;

    assert!(result.is_err());

    Ok(())
}
