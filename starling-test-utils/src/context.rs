//! Test context returned by [`TestBuilder`](crate::TestBuilder).

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{constant::TEST_BOT_TOKEN, error::TestError};

/// Environment a test runs against.
///
/// ```ignore
/// let mut test = TestBuilder::new().with_payment_tables().build().await?;
///
/// let post = test.payment().insert_mock_post(1, TEST_USER_ID).await?;
/// let refund = test.telegram().create_refund_endpoint(1);
///
/// // ... exercise code against `test.db` and `test.telegram_client`
///
/// refund.assert();
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to an in-memory SQLite database
    pub db: DatabaseConnection,
    /// Bot API client sending every request to the mock server
    pub telegram_client: telegram::Client,

    /// Mock HTTP server standing in for the Bot API
    pub(crate) server: ServerGuard,
    /// Mocks created by the builder, kept alive for the duration of the test
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let telegram_client = telegram::Client::builder()
            .api_url(&server.url())
            .bot_token(TEST_BOT_TOKEN)
            .build()?;

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            telegram_client,
            server,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock Bot API server.
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Assert all mock endpoints created by the builder were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
