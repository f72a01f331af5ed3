//! Business logic services.
//!
//! Services borrow the connections they need (`new(&db, &telegram_client)`), are cheap
//! to construct per request, and run provider calls that may fail transiently through
//! [`retry::RetryContext`].

pub mod auth;
pub mod notification;
pub mod payment;
pub mod retry;
