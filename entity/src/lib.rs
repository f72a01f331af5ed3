//! `SeaORM` entities for Starling.

pub mod prelude;

pub mod payment;
pub mod post;
