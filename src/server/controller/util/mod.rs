//! Request helpers shared by the controllers.

pub mod auth;
pub mod extract;
