//! Minimal typed client for the Telegram Bot API.
//!
//! Covers the subset of Bot API methods used for Telegram Stars payments and user
//! notifications: invoice links, star refunds, the star transaction log, the bot's
//! star balance, pre-checkout answers and plain text messages. Requests are sent as
//! JSON `POST`s to `{api_url}/bot{token}/{method}` and responses are unwrapped from
//! the Bot API `{ok, result, description, error_code}` envelope.

pub mod client;
pub mod error;
pub mod model;

pub use client::{Client, ClientBuilder};
pub use error::Error;

/// Currency code for Telegram Stars.
pub const STARS_CURRENCY: &str = "XTR";

/// Maximum page size accepted by `getStarTransactions`.
pub const MAX_STAR_TRANSACTIONS_LIMIT: u32 = 100;
