//! Placeholder values used across tests. None of these are real credentials.

/// Bot token the test Bot API client is built with and init data is signed with.
pub static TEST_BOT_TOKEN: &str = "123456789:TEST-bot-token-for-starling";

/// Telegram user ID configured as the administrator in test application state.
pub const TEST_ADMIN_USER_ID: i64 = 100_000_001;

/// Telegram user ID of the regular user most fixtures belong to.
pub const TEST_USER_ID: i64 = 200_000_002;

/// Invoice link returned by the mocked `createInvoiceLink` endpoint.
pub static TEST_INVOICE_URL: &str = "https://t.me/$test-invoice";
