use serde::{Deserialize, Serialize};

use super::update::User;

/// Portion of an invoice price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPrice {
    pub label: String,
    /// Price in the smallest units of the currency; for Stars, whole stars.
    pub amount: i64,
}

/// Parameters of `createInvoiceLink`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateInvoiceLink {
    pub title: String,
    pub description: String,
    /// Bot-defined payload, not shown to the user. 1-128 bytes.
    pub payload: String,
    /// Empty for payments in Telegram Stars.
    pub provider_token: String,
    pub currency: String,
    pub prices: Vec<LabeledPrice>,
}

/// Incoming pre-checkout query, must be answered within 10 seconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreCheckoutQuery {
    pub id: String,
    pub from: User,
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
}

/// Service message content for a completed payment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuccessfulPayment {
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
    pub telegram_payment_charge_id: String,
    pub provider_payment_charge_id: String,
}

/// Service message content for a refunded payment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefundedPayment {
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
    pub telegram_payment_charge_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_payment_charge_id: Option<String>,
}
