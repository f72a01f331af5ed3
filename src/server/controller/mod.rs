//! HTTP controller endpoints for the Starling API.
//!
//! Handlers authenticate through the extractors in [`util::auth`], delegate to the
//! services and map results to JSON responses. Every handler is annotated with
//! `utoipa::path` so it appears in the OpenAPI document.

pub mod admin;
pub mod auth;
pub mod payment;
pub mod util;
pub mod webhook;
