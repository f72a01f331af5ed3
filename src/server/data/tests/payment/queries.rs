use super::*;

/// Expect the lookback query to exclude payments older than the cutoff
#[tokio::test]
async fn created_since_excludes_old_payments() -> Result<(), TestError> {
    let old = entity::payment::Model {
        created_at: (Utc::now() - Duration::days(31)).naive_utc(),
        ..payment_factory::mock_payment("old", 1, TEST_USER_ID, 1, PaymentStatus::Succeeded)
    };
    let recent = entity::payment::Model {
        created_at: (Utc::now() - Duration::days(2)).naive_utc(),
        ..payment_factory::mock_payment("recent", 1, TEST_USER_ID, 1, PaymentStatus::Succeeded)
    };
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_mock_payment(old)
        .with_mock_payment(recent)
        .build()
        .await?;

    let repo = PaymentRepository::new(&test.db);
    let payments = repo
        .get_created_since((Utc::now() - Duration::days(30)).naive_utc())
        .await?;

    let ids: Vec<&str> = payments.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["recent"]);

    Ok(())
}

/// Expect a user's payments newest first and no payments of other users
#[tokio::test]
async fn by_user_newest_first() -> Result<(), TestError> {
    let first = entity::payment::Model {
        created_at: (Utc::now() - Duration::hours(2)).naive_utc(),
        ..payment_factory::mock_payment("first", 1, TEST_USER_ID, 1, PaymentStatus::Failed)
    };
    let second = entity::payment::Model {
        created_at: (Utc::now() - Duration::hours(1)).naive_utc(),
        ..payment_factory::mock_payment("second", 1, TEST_USER_ID, 1, PaymentStatus::Created)
    };
    let other = payment_factory::mock_payment("other", 2, TEST_ADMIN_USER_ID, 1, PaymentStatus::Created);
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_mock_post(2, TEST_ADMIN_USER_ID)
        .with_mock_payment(first)
        .with_mock_payment(second)
        .with_mock_payment(other)
        .build()
        .await?;

    let repo = PaymentRepository::new(&test.db);
    let payments = repo.get_by_user_id(TEST_USER_ID).await?;

    let ids: Vec<&str> = payments.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["second", "first"]);

    Ok(())
}

/// Expect only created or pending payments older than the cutoff to be unsettled
#[tokio::test]
async fn unsettled_before_filters_status_and_age() -> Result<(), TestError> {
    let day_old = (Utc::now() - Duration::hours(25)).naive_utc();
    let stale_created = entity::payment::Model {
        created_at: day_old,
        ..payment_factory::mock_payment("stale-created", 1, TEST_USER_ID, 1, PaymentStatus::Created)
    };
    let stale_pending = entity::payment::Model {
        created_at: day_old,
        ..payment_factory::mock_payment("stale-pending", 1, TEST_USER_ID, 1, PaymentStatus::Pending)
    };
    let stale_succeeded = entity::payment::Model {
        created_at: day_old,
        ..payment_factory::mock_payment("stale-succeeded", 1, TEST_USER_ID, 1, PaymentStatus::Succeeded)
    };
    let fresh = payment_factory::mock_payment("fresh", 1, TEST_USER_ID, 1, PaymentStatus::Created);
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_mock_payment(stale_created)
        .with_mock_payment(stale_pending)
        .with_mock_payment(stale_succeeded)
        .with_mock_payment(fresh)
        .build()
        .await?;

    let repo = PaymentRepository::new(&test.db);
    let payments = repo
        .get_unsettled_before((Utc::now() - Duration::hours(24)).naive_utc())
        .await?;

    let mut ids: Vec<&str> = payments.iter().map(|p| p.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["stale-created", "stale-pending"]);

    Ok(())
}

/// Expect lookup by Telegram charge ID to find the matching payment
#[tokio::test]
async fn finds_by_telegram_charge_id() -> Result<(), TestError> {
    let payment = entity::payment::Model {
        telegram_payment_charge_id: Some("c1".to_string()),
        ..payment_factory::mock_payment("p1", 1, TEST_USER_ID, 3, PaymentStatus::Succeeded)
    };
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .with_mock_payment(payment)
        .build()
        .await?;

    let repo = PaymentRepository::new(&test.db);

    let found = repo.get_by_telegram_charge_id("c1").await?;
    assert_eq!(found.map(|p| p.id), Some("p1".to_string()));

    let missing = repo.get_by_telegram_charge_id("c2").await?;
    assert!(missing.is_none());

    Ok(())
}
