use super::*;

/// Expect granting premium to set the pointer and star count and clear the pending flag
#[tokio::test]
async fn grant_premium_sets_fields() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .build()
        .await?;

    let repo = PostRepository::new(&test.db);
    assert!(repo.set_payment_pending(1, true).await?);
    assert!(repo.grant_premium(1, "p1", 5).await?);

    let post = repo.get_by_id(1).await?.expect("post exists");
    assert!(post.is_premium());
    assert_eq!(post.star_count, 5);
    assert_eq!(post.premium_payment_id.as_deref(), Some("p1"));
    assert!(!post.payment_pending);

    Ok(())
}

/// Expect revoking the active payment to zero the star count and clear the pointer
#[tokio::test]
async fn revoke_premium_clears_active_payment() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .build()
        .await?;
    test.payment().set_post_premium(1, "p1", 5).await?;

    let repo = PostRepository::new(&test.db);
    assert!(repo.revoke_premium(1, "p1").await?);

    let post = repo.get_by_id(1).await?.expect("post exists");
    assert!(!post.is_premium());
    assert_eq!(post.star_count, 0);
    assert!(post.premium_payment_id.is_none());

    Ok(())
}

/// Expect revoking a superseded payment to leave the newer premium grant in place
#[tokio::test]
async fn revoke_premium_ignores_other_payment() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_payment_tables()
        .with_mock_post(1, TEST_USER_ID)
        .build()
        .await?;
    test.payment().set_post_premium(1, "p2", 7).await?;

    let repo = PostRepository::new(&test.db);
    assert!(!repo.revoke_premium(1, "p1").await?);

    let post = repo.get_by_id(1).await?.expect("post exists");
    assert_eq!(post.star_count, 7);
    assert_eq!(post.premium_payment_id.as_deref(), Some("p2"));

    Ok(())
}

/// Expect false when updating a post that does not exist
#[tokio::test]
async fn missing_post_reports_false() -> Result<(), TestError> {
    let test = test_setup_with_payment_tables!()?;

    let repo = PostRepository::new(&test.db);

    assert!(!repo.set_payment_pending(404, true).await?);
    assert!(!repo.grant_premium(404, "p1", 1).await?);

    Ok(())
}
