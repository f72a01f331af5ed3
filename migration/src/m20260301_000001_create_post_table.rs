use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(pk_auto(Post::Id))
                    .col(big_integer(Post::UserId))
                    .col(integer(Post::StarCount).default(0))
                    .col(string_null(Post::PremiumPaymentId))
                    .col(boolean(Post::PaymentPending).default(false))
                    .col(timestamp(Post::CreatedAt))
                    .col(timestamp(Post::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Post {
    Table,
    Id,
    UserId,
    StarCount,
    PremiumPaymentId,
    PaymentPending,
    CreatedAt,
    UpdatedAt,
}
