use crate::TestContext;

pub mod data;
pub mod factory;

impl TestContext {
    pub fn payment(&self) -> PaymentFixtures<'_> {
        PaymentFixtures { test: self }
    }
}

pub struct PaymentFixtures<'a> {
    pub test: &'a TestContext,
}
