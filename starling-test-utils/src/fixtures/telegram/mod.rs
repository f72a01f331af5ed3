use crate::{constant::TEST_BOT_TOKEN, TestContext};

pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn telegram(&mut self) -> TelegramFixtures<'_> {
        TelegramFixtures { test: self }
    }
}

pub struct TelegramFixtures<'a> {
    pub test: &'a mut TestContext,
}

/// Path the test Bot API client requests for `method`.
pub fn bot_method_path(method: &str) -> String {
    format!("/bot{}/{}", TEST_BOT_TOKEN, method)
}
