use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_create_post_table::Post;

static FK_PAYMENT_POST_ID: &str = "fk_payment_post_id";
static IDX_PAYMENT_TELEGRAM_CHARGE_ID: &str = "idx_payment_telegram_payment_charge_id";
static IDX_PAYMENT_CREATED_AT: &str = "idx_payment_created_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(string_len(Payment::Id, 36).primary_key())
                    .col(text(Payment::InvoicePayload))
                    .col(big_integer(Payment::UserId))
                    .col(integer(Payment::PostId))
                    .col(integer(Payment::StarAmount))
                    .col(string_len(Payment::Status, 16))
                    .col(string_null(Payment::TelegramPaymentChargeId))
                    .col(string_null(Payment::ProviderPaymentChargeId))
                    .col(text_null(Payment::RawUpdate))
                    .col(timestamp(Payment::CreatedAt))
                    .col(timestamp(Payment::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_POST_ID)
                    .from_tbl(Payment::Table)
                    .from_col(Payment::PostId)
                    .to_tbl(Post::Table)
                    .to_col(Post::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_TELEGRAM_CHARGE_ID)
                    .table(Payment::Table)
                    .col(Payment::TelegramPaymentChargeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_CREATED_AT)
                    .table(Payment::Table)
                    .col(Payment::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PAYMENT_POST_ID)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    InvoicePayload,
    UserId,
    PostId,
    StarAmount,
    Status,
    TelegramPaymentChargeId,
    ProviderPaymentChargeId,
    RawUpdate,
    CreatedAt,
    UpdatedAt,
}
