//! Post and payment row insertion.

use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    fixtures::payment::{factory, PaymentFixtures},
    model::{PaymentModel, PostModel},
};

impl<'a> PaymentFixtures<'a> {
    /// Insert a non-premium post owned by `user_id`.
    pub async fn insert_mock_post(&self, post_id: i32, user_id: i64) -> Result<PostModel, TestError> {
        let post = factory::mock_post(post_id, user_id);

        Ok(entity::prelude::Post::insert(entity::post::ActiveModel {
            id: ActiveValue::Set(post.id),
            user_id: ActiveValue::Set(post.user_id),
            star_count: ActiveValue::Set(post.star_count),
            premium_payment_id: ActiveValue::Set(post.premium_payment_id),
            payment_pending: ActiveValue::Set(post.payment_pending),
            created_at: ActiveValue::Set(post.created_at),
            updated_at: ActiveValue::Set(post.updated_at),
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }

    /// Mark a post premium through `payment_id` with `star_count` stars.
    pub async fn set_post_premium(
        &self,
        post_id: i32,
        payment_id: &str,
        star_count: i32,
    ) -> Result<(), TestError> {
        entity::prelude::Post::update(entity::post::ActiveModel {
            id: ActiveValue::Unchanged(post_id),
            star_count: ActiveValue::Set(star_count),
            premium_payment_id: ActiveValue::Set(Some(payment_id.to_string())),
            payment_pending: ActiveValue::Set(false),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec(&self.test.db)
        .await?;

        Ok(())
    }

    /// Insert a payment row exactly as given.
    ///
    /// The referenced post must already exist.
    pub async fn insert_payment(&self, payment: PaymentModel) -> Result<PaymentModel, TestError> {
        Ok(entity::prelude::Payment::insert(entity::payment::ActiveModel {
            id: ActiveValue::Set(payment.id),
            invoice_payload: ActiveValue::Set(payment.invoice_payload),
            user_id: ActiveValue::Set(payment.user_id),
            post_id: ActiveValue::Set(payment.post_id),
            star_amount: ActiveValue::Set(payment.star_amount),
            status: ActiveValue::Set(payment.status),
            telegram_payment_charge_id: ActiveValue::Set(payment.telegram_payment_charge_id),
            provider_payment_charge_id: ActiveValue::Set(payment.provider_payment_charge_id),
            raw_update: ActiveValue::Set(payment.raw_update),
            created_at: ActiveValue::Set(payment.created_at),
            updated_at: ActiveValue::Set(payment.updated_at),
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }

    /// Fetch a payment by ID, for assertions.
    pub async fn get_payment(&self, payment_id: &str) -> Result<Option<PaymentModel>, TestError> {
        Ok(entity::prelude::Payment::find_by_id(payment_id.to_string())
            .one(&self.test.db)
            .await?)
    }

    /// Fetch a post by ID, for assertions.
    pub async fn get_post(&self, post_id: i32) -> Result<Option<PostModel>, TestError> {
        Ok(entity::prelude::Post::find_by_id(post_id)
            .one(&self.test.db)
            .await?)
    }
}
