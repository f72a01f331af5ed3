//! `SeaORM` Entity for posts, limited to the premium fields

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Telegram user ID of the author
    pub user_id: i64,
    /// Stars of the active premium payment, 0 when the post is not premium
    pub star_count: i32,
    #[sea_orm(nullable)]
    pub premium_payment_id: Option<String>,
    /// Set while an invoice for this post is outstanding
    pub payment_pending: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn is_premium(&self) -> bool {
        self.premium_payment_id.is_some() && self.star_count > 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
