use chrono::{DateTime, NaiveDateTime, Utc};
use entity::payment::PaymentStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentDto {
    /// Stars to pay, 1 to 10
    pub star_amount: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct InvoiceDto {
    pub payment_id: String,
    pub invoice_url: String,
    pub star_amount: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: String,
    pub post_id: i32,
    pub star_amount: i32,
    #[schema(value_type = String)]
    pub status: PaymentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<entity::payment::Model> for PaymentDto {
    fn from(payment: entity::payment::Model) -> Self {
        Self {
            id: payment.id,
            post_id: payment.post_id,
            star_amount: payment.star_amount,
            status: payment.status,
            created_at: payment.created_at,
            updated_at: payment.updated_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StarBalanceDto {
    pub balance: i64,
    pub cached_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Payment whose status reconciliation changed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReconciliationUpdate {
    pub payment_id: String,
    #[schema(value_type = String)]
    pub old_status: PaymentStatus,
    #[schema(value_type = String)]
    pub new_status: PaymentStatus,
}

/// Local payment whose charge is missing from the provider's transaction log
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReconciliationAnomaly {
    pub payment_id: String,
    pub telegram_payment_charge_id: String,
}

/// Provider verdict that the local status cannot legally move to, left unapplied
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReconciliationConflict {
    pub payment_id: String,
    #[schema(value_type = String)]
    pub local_status: PaymentStatus,
    #[schema(value_type = String)]
    pub provider_status: PaymentStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReconciliationItemError {
    pub payment_id: String,
    pub error: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReconciliationCounts {
    pub updated: usize,
    pub unchanged: usize,
    pub not_found: usize,
    pub conflicts: usize,
    pub errors: usize,
}

/// Outcome of one reconciliation run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReconciliationSummary {
    pub updated: Vec<ReconciliationUpdate>,
    /// IDs of payments whose status already matched the provider
    pub unchanged: Vec<String>,
    pub not_found: Vec<ReconciliationAnomaly>,
    pub conflicts: Vec<ReconciliationConflict>,
    pub errors: Vec<ReconciliationItemError>,
    /// Set when transaction paging stopped at the page ceiling or the deadline
    /// while more transactions may have been available. Transactions are paged
    /// oldest first, so the ones left out are the newest.
    pub possibly_incomplete: bool,
    /// Number of provider transactions examined
    pub transactions_fetched: usize,
    pub counts: ReconciliationCounts,
}
