use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::payment::StarBalanceDto;

/// Correlation payload sent with every invoice and echoed back by Telegram in
/// pre-checkout queries and payment service messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayload {
    pub post_id: i32,
    pub user_id: i64,
    pub payment_id: String,
    /// Unix milliseconds at creation
    pub timestamp: i64,
}

/// Cached star balance stored under `stars:balance`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCache {
    pub balance: i64,
    pub cached_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<BalanceCache> for StarBalanceDto {
    fn from(cache: BalanceCache) -> Self {
        Self {
            balance: cache.balance,
            cached_at: cache.cached_at,
            expires_at: cache.expires_at,
        }
    }
}
