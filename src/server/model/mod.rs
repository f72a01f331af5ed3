//! Server-side models: application state, database aliases, sessions, verified
//! Telegram identities and payment payloads.

pub mod app;
pub mod auth;
pub mod db;
pub mod payment;
pub mod session;
