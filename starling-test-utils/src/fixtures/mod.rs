//! Fixtures used during test execution.
//!
//! - `payment` - post and payment rows
//! - `telegram` - Bot API mock endpoints, signed init data and update payloads

pub mod payment;
pub mod telegram;
