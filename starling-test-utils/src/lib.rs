//! Test harness shared by the Starling crates.
//!
//! Tests are set up in two phases. [`TestBuilder`] declares the database tables,
//! fixture rows and mocked Bot API endpoints a test needs; `build()` executes them and
//! returns a [`TestContext`] holding an in-memory SQLite database, the mockito server
//! and a Bot API client pointed at it.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod redis;
pub mod setup;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_ADMIN_USER_ID, TEST_BOT_TOKEN, TEST_USER_ID},
        fixtures::{payment::factory as payment_factory, telegram::factory as telegram_factory},
        test_setup_with_payment_tables, test_setup_with_tables, TestBuilder, TestContext,
        TestError,
    };
}
