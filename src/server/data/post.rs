use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::db::PostModel;

pub struct PostRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostRepository<'a> {
    /// Creates a new instance of [`PostRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, post_id: i32) -> Result<Option<PostModel>, DbErr> {
        entity::prelude::Post::find_by_id(post_id).one(self.db).await
    }

    /// Sets or clears the payment pending flag, returning whether the post exists
    pub async fn set_payment_pending(&self, post_id: i32, pending: bool) -> Result<bool, DbErr> {
        let result = entity::prelude::Post::update_many()
            .set(entity::post::ActiveModel {
                payment_pending: ActiveValue::Set(pending),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::post::Column::Id.eq(post_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Makes a post premium through `payment_id` and clears its pending flag
    pub async fn grant_premium(
        &self,
        post_id: i32,
        payment_id: &str,
        star_count: i32,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Post::update_many()
            .set(entity::post::ActiveModel {
                star_count: ActiveValue::Set(star_count),
                premium_payment_id: ActiveValue::Set(Some(payment_id.to_string())),
                payment_pending: ActiveValue::Set(false),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::post::Column::Id.eq(post_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Zeroes the star count and clears the payment pointer of a post
    ///
    /// Only applies while the post points at `payment_id` or at no payment, so revoking
    /// an old payment never strips premium granted by a newer one.
    pub async fn revoke_premium(&self, post_id: i32, payment_id: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::Post::update_many()
            .set(entity::post::ActiveModel {
                star_count: ActiveValue::Set(0),
                premium_payment_id: ActiveValue::Set(None),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::post::Column::Id.eq(post_id))
            .filter(
                Condition::any()
                    .add(entity::post::Column::PremiumPaymentId.eq(payment_id))
                    .add(entity::post::Column::PremiumPaymentId.is_null()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
