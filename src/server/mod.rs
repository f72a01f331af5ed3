//! Server application core modules.
//!
//! HTTP routing and extractors, Telegram init data verification, sessions over a
//! key-value store, the Telegram Stars payment ledger, reconciliation against the
//! provider's transaction log, and the cron jobs that run it.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod store;
