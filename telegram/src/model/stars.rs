use serde::{Deserialize, Serialize};

use super::update::User;

/// Counterparty of a star transaction.
///
/// Only the user partner carries data this client cares about; every other partner
/// type is collapsed into [`TransactionPartner::Other`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionPartner {
    User {
        user: User,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        invoice_payload: Option<String>,
    },
    #[serde(other)]
    Other,
}

/// Entry of the bot's star transaction log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarTransaction {
    /// Unique identifier; for incoming payments this equals the
    /// `telegram_payment_charge_id` of the payment.
    pub id: String,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nanostar_amount: Option<i64>,
    /// Unix time the transaction was created.
    pub date: i64,
    /// Present for incoming transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<TransactionPartner>,
    /// Present for outgoing transactions such as refunds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<TransactionPartner>,
}

/// Result of `getStarTransactions`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StarTransactions {
    pub transactions: Vec<StarTransaction>,
}

/// Result of `getMyStarBalance`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarAmount {
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nanostar_amount: Option<i64>,
}
