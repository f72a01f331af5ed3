use super::*;

/// Expect status, charge IDs and raw update to be written together
#[tokio::test]
async fn writes_status_and_charge_ids() -> Result<(), TestError> {
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
        .build()
        .await?;

    let repo = PaymentRepository::new(&test.db);
    let updated = repo
        .update_status(
            "p1",
            PaymentStatus::Succeeded,
            Some(ChargeIds {
                telegram_payment_charge_id: "c1".to_string(),
                provider_payment_charge_id: Some("pc1".to_string()),
            }),
            Some(r#"{"update_id":1}"#.to_string()),
        )
        .await?
        .expect("payment exists");

    assert_eq!(updated.status, PaymentStatus::Succeeded);
    assert_eq!(updated.telegram_payment_charge_id.as_deref(), Some("c1"));
    assert_eq!(updated.provider_payment_charge_id.as_deref(), Some("pc1"));
    assert_eq!(updated.raw_update.as_deref(), Some(r#"{"update_id":1}"#));

    Ok(())
}

/// Expect optional fields to be left alone when not provided
#[tokio::test]
async fn keeps_fields_not_provided() -> Result<(), TestError> {
    let payment = entity::payment::Model {
        telegram_payment_charge_id: Some("c1".to_string()),
        raw_update: Some("{}".to_string()),
        ..payment_factory::mock_payment("p1", 1, TEST_USER_ID, 5, PaymentStatus::Succeeded)
    };
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_mock_payment(payment)
        .build()
        .await?;

    let repo = PaymentRepository::new(&test.db);
    let updated = repo
        .update_status("p1", PaymentStatus::Refunded, None, None)
        .await?
        .expect("payment exists");

    assert_eq!(updated.status, PaymentStatus::Refunded);
    assert_eq!(updated.telegram_payment_charge_id.as_deref(), Some("c1"));
    assert_eq!(updated.raw_update.as_deref(), Some("{}"));

    Ok(())
}

/// Expect an illegal transition to be written anyway, callers enforce the lifecycle
#[tokio::test]
async fn does_not_validate_transition() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_mock_payment(payment_factory::mock_payment(
            "p1",
            1,
            TEST_USER_ID,
            5,
            PaymentStatus::Refunded,
        ))
        .build()
        .await?;

    let repo = PaymentRepository::new(&test.db);
    let updated = repo
        .update_status("p1", PaymentStatus::Created, None, None)
        .await?;

    assert_eq!(updated.map(|p| p.status), Some(PaymentStatus::Created));

    Ok(())
}

/// Expect None when the payment does not exist
#[tokio::test]
async fn returns_none_for_missing_payment() -> Result<(), TestError> {
    let test = test_setup_with_payment_tables!()?;

    let repo = PaymentRepository::new(&test.db);
    let updated = repo
        .update_status("missing", PaymentStatus::Failed, None, None)
        .await?;

    assert!(updated.is_none());

    Ok(())
}
