//! Database model type aliases.

/// Type alias for payment database model.
///
/// # Fields (from `entity::payment::Model`)
/// - `id` - UUID v4 string generated when the payment is created
/// - `invoice_payload` - JSON payload handed to Telegram with the invoice
/// - `user_id` - Telegram ID of the paying user
/// - `post_id` - Post the payment makes premium
/// - `star_amount` - Stars paid, 1 to 10
/// - `status` - Lifecycle state
/// - `telegram_payment_charge_id` - Telegram charge ID, set once the payment succeeds
/// - `provider_payment_charge_id` - Provider charge ID, set once the payment succeeds
/// - `raw_update` - Raw Telegram update that last changed the payment
/// - `created_at` / `updated_at` - Timestamps
pub type PaymentModel = entity::payment::Model;

/// Type alias for post database model.
///
/// Only the fields the payment flow reads and writes are modelled.
pub type PostModel = entity::post::Model;
