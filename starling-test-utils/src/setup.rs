/// Build a [`TestContext`](crate::TestContext) with tables for the given entities.
///
/// ```ignore
/// let test = test_setup_with_tables!(entity::prelude::Post)?;
/// ```
#[macro_export]
macro_rules! test_setup_with_tables {
    () => {{
        $crate::TestBuilder::new().build().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        $crate::TestBuilder::new()
            $(.with_table($entity))+
            .build()
            .await
    }};
}

/// Build a [`TestContext`](crate::TestContext) with the post and payment tables,
/// plus any additional entities.
#[macro_export]
macro_rules! test_setup_with_payment_tables {
    () => {{
        $crate::TestBuilder::new().with_payment_tables().build().await
    }};

    ($($entity:expr),+ $(,)?) => {{
        $crate::TestBuilder::new()
            .with_payment_tables()
            $(.with_table($entity))+
            .build()
            .await
    }};
}
