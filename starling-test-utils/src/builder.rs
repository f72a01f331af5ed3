//! Declarative test builder.
//!
//! Every `with_*` call is queued and executed in `build()`: tables first, then fixture
//! rows, then mock endpoints.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use telegram::model::StarTransaction;

use crate::{error::TestError, model::PaymentModel, TestContext};

/// Builder for declarative test initialization.
///
/// ```no_run
/// use starling_test_utils::prelude::*;
///
/// # async fn example() -> Result<(), TestError> {
/// let test = TestBuilder::new()
///     .with_payment_tables()
///     .with_mock_post(1, TEST_USER_ID)
///     .with_refund_endpoint(1)
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_payment_tables: bool,

    posts: Vec<(i32, i64)>, // (post_id, user_id)
    payments: Vec<PaymentModel>,

    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    invoice_link_endpoints: Vec<usize>,
    refund_endpoints: Vec<usize>,
    star_transactions_endpoints: Vec<(u32, Vec<StarTransaction>, usize)>,
    star_balance_endpoints: Vec<(i64, usize)>,
    send_message_endpoints: Vec<usize>,
    answer_pre_checkout_endpoints: Vec<(bool, usize)>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_payment_tables: false,
            posts: Vec::new(),
            payments: Vec::new(),
            mock_builders: Vec::new(),
            invoice_link_endpoints: Vec::new(),
            refund_endpoints: Vec::new(),
            star_transactions_endpoints: Vec::new(),
            star_balance_endpoints: Vec::new(),
            send_message_endpoints: Vec::new(),
            answer_pre_checkout_endpoints: Vec::new(),
        }
    }

    /// Create the post and payment tables.
    pub fn with_payment_tables(mut self) -> Self {
        self.include_payment_tables = true;
        self
    }

    /// Create the table of a single entity.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a non-premium post.
    pub fn with_mock_post(mut self, post_id: i32, user_id: i64) -> Self {
        self.posts.push((post_id, user_id));
        self
    }

    /// Insert a payment row; its post must be added with [`Self::with_mock_post`].
    pub fn with_mock_payment(mut self, payment: PaymentModel) -> Self {
        self.payments.push(payment);
        self
    }

    pub fn with_invoice_link_endpoint(mut self, expected_requests: usize) -> Self {
        self.invoice_link_endpoints.push(expected_requests);
        self
    }

    pub fn with_refund_endpoint(mut self, expected_requests: usize) -> Self {
        self.refund_endpoints.push(expected_requests);
        self
    }

    /// `getStarTransactions` answering the page starting at `offset`.
    pub fn with_star_transactions_endpoint(
        mut self,
        offset: u32,
        transactions: Vec<StarTransaction>,
        expected_requests: usize,
    ) -> Self {
        self.star_transactions_endpoints
            .push((offset, transactions, expected_requests));
        self
    }

    pub fn with_star_balance_endpoint(mut self, amount: i64, expected_requests: usize) -> Self {
        self.star_balance_endpoints.push((amount, expected_requests));
        self
    }

    pub fn with_send_message_endpoint(mut self, expected_requests: usize) -> Self {
        self.send_message_endpoints.push(expected_requests);
        self
    }

    pub fn with_answer_pre_checkout_endpoint(mut self, ok: bool, expected_requests: usize) -> Self {
        self.answer_pre_checkout_endpoints
            .push((ok, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control over the mock server.
    ///
    /// Custom endpoints are created before the shortcuts above, so an error mock with
    /// `.expect(n)` added here is matched first and a success shortcut for the same
    /// method takes over once it is exhausted.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    /// - `Err(TestError::TelegramError)` - Bot API client could not be built
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut test = TestContext::new().await?;

        // 1. Tables
        let mut all_tables = Vec::new();

        if self.include_payment_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.push(schema.create_table_from_entity(entity::prelude::Post));
            all_tables.push(schema.create_table_from_entity(entity::prelude::Payment));
        }

        all_tables.extend(self.tables);
        test.with_tables(all_tables).await?;

        // 2. Fixture rows
        for (post_id, user_id) in self.posts {
            test.payment().insert_mock_post(post_id, user_id).await?;
        }

        for payment in self.payments {
            test.payment().insert_payment(payment).await?;
        }

        // 3. Mock endpoints, custom ones first for sequential matching
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut test.server));
        }

        for expected in self.invoice_link_endpoints {
            mocks.push(test.telegram().create_invoice_link_endpoint(expected));
        }

        for expected in self.refund_endpoints {
            mocks.push(test.telegram().create_refund_endpoint(expected));
        }

        for (offset, transactions, expected) in self.star_transactions_endpoints {
            mocks.push(
                test.telegram()
                    .create_star_transactions_endpoint(offset, transactions, expected),
            );
        }

        for (amount, expected) in self.star_balance_endpoints {
            mocks.push(test.telegram().create_star_balance_endpoint(amount, expected));
        }

        for expected in self.send_message_endpoints {
            mocks.push(test.telegram().create_send_message_endpoint(expected));
        }

        for (ok, expected) in self.answer_pre_checkout_endpoints {
            mocks.push(test.telegram().create_answer_pre_checkout_endpoint(ok, expected));
        }

        test.mocks = mocks;

        Ok(test)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
