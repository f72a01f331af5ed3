//! Database model type aliases, matching those of the main crate.

/// Type alias for payment database model.
pub type PaymentModel = entity::payment::Model;

/// Type alias for post database model.
pub type PostModel = entity::post::Model;
