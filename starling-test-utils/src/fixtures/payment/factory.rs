use chrono::Utc;
use entity::payment::PaymentStatus;
use serde_json::json;

use crate::model::{PaymentModel, PostModel};

/// Create a post that is neither premium nor awaiting payment.
pub fn mock_post(post_id: i32, user_id: i64) -> PostModel {
    let now = Utc::now().naive_utc();

    PostModel {
        id: post_id,
        user_id,
        star_count: 0,
        premium_payment_id: None,
        payment_pending: false,
        created_at: now,
        updated_at: now,
    }
}

/// Invoice payload in the shape the ledger produces.
pub fn mock_invoice_payload(post_id: i32, user_id: i64, payment_id: &str) -> String {
    json!({
        "postId": post_id,
        "userId": user_id,
        "paymentId": payment_id,
        "timestamp": Utc::now().timestamp_millis(),
    })
    .to_string()
}

/// Create a payment created just now with no charge IDs.
///
/// Override fields with struct update syntax where a test needs a charge ID or an
/// older `created_at`.
pub fn mock_payment(
    payment_id: &str,
    post_id: i32,
    user_id: i64,
    star_amount: i32,
    status: PaymentStatus,
) -> PaymentModel {
    let now = Utc::now().naive_utc();

    PaymentModel {
        id: payment_id.to_string(),
        invoice_payload: mock_invoice_payload(post_id, user_id, payment_id),
        user_id,
        post_id,
        star_amount,
        status,
        telegram_payment_charge_id: None,
        provider_payment_charge_id: None,
        raw_update: None,
        created_at: now,
        updated_at: now,
    }
}
