//! Starling: Telegram Mini App session authentication and Telegram Stars payments.

pub mod model;
pub mod server;
