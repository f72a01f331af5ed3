//! Repositories over the `payment` and `post` tables.
//!
//! Repositories are thin wrappers issuing single statements; lifecycle rules live
//! in the services calling them.

pub mod payment;
pub mod post;

#[cfg(test)]
mod tests;
