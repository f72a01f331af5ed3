use chrono::{NaiveDateTime, Utc};
use entity::payment::PaymentStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::db::PaymentModel;

/// Charge identifiers Telegram assigns once a payment succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChargeIds {
    pub telegram_payment_charge_id: String,
    pub provider_payment_charge_id: Option<String>,
}

pub struct PaymentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentRepository<'a> {
    /// Creates a new instance of [`PaymentRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a payment in the `created` state
    pub async fn create(
        &self,
        payment_id: &str,
        invoice_payload: &str,
        user_id: i64,
        post_id: i32,
        star_amount: i32,
    ) -> Result<PaymentModel, DbErr> {
        let now = Utc::now().naive_utc();

        let payment = entity::payment::ActiveModel {
            id: ActiveValue::Set(payment_id.to_string()),
            invoice_payload: ActiveValue::Set(invoice_payload.to_string()),
            user_id: ActiveValue::Set(user_id),
            post_id: ActiveValue::Set(post_id),
            star_amount: ActiveValue::Set(star_amount),
            status: ActiveValue::Set(PaymentStatus::Created),
            telegram_payment_charge_id: ActiveValue::Set(None),
            provider_payment_charge_id: ActiveValue::Set(None),
            raw_update: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        payment.insert(self.db).await
    }

    pub async fn get_by_id(&self, payment_id: &str) -> Result<Option<PaymentModel>, DbErr> {
        entity::prelude::Payment::find_by_id(payment_id.to_string())
            .one(self.db)
            .await
    }

    pub async fn get_by_telegram_charge_id(
        &self,
        telegram_payment_charge_id: &str,
    ) -> Result<Option<PaymentModel>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::TelegramPaymentChargeId.eq(telegram_payment_charge_id))
            .one(self.db)
            .await
    }

    /// Overwrites the status of a payment
    ///
    /// Does not check the transition is legal. Charge IDs and the raw update are only
    /// written when provided. Returns `None` if the payment does not exist.
    pub async fn update_status(
        &self,
        payment_id: &str,
        status: PaymentStatus,
        charge_ids: Option<ChargeIds>,
        raw_update: Option<String>,
    ) -> Result<Option<PaymentModel>, DbErr> {
        let mut payment = entity::payment::ActiveModel {
            id: ActiveValue::Unchanged(payment_id.to_string()),
            status: ActiveValue::Set(status),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        if let Some(charge_ids) = charge_ids {
            payment.telegram_payment_charge_id =
                ActiveValue::Set(Some(charge_ids.telegram_payment_charge_id));
            payment.provider_payment_charge_id =
                ActiveValue::Set(charge_ids.provider_payment_charge_id);
        }
        if let Some(raw_update) = raw_update {
            payment.raw_update = ActiveValue::Set(Some(raw_update));
        }

        match entity::prelude::Payment::update(payment).exec(self.db).await {
            Ok(model) => Ok(Some(model)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Payments of a user, newest first
    pub async fn get_by_user_id(&self, user_id: i64) -> Result<Vec<PaymentModel>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::UserId.eq(user_id))
            .order_by_desc(entity::payment::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Payments created at or after `since`, newest first
    pub async fn get_created_since(
        &self,
        since: NaiveDateTime,
    ) -> Result<Vec<PaymentModel>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::CreatedAt.gte(since))
            .order_by_desc(entity::payment::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Payments still `created` or `pending` that were created before `cutoff`
    pub async fn get_unsettled_before(
        &self,
        cutoff: NaiveDateTime,
    ) -> Result<Vec<PaymentModel>, DbErr> {
        entity::prelude::Payment::find()
            .filter(
                entity::payment::Column::Status
                    .is_in([PaymentStatus::Created, PaymentStatus::Pending]),
            )
            .filter(entity::payment::Column::CreatedAt.lt(cutoff))
            .order_by_asc(entity::payment::Column::CreatedAt)
            .all(self.db)
            .await
    }
}
