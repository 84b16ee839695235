//! Create `coupon` table.
//!
//! `code` uniqueness is enforced here; `discount > 0` is checked before insert.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Coupon::Table)
                    .if_not_exists()
                    .col(pk_auto(Coupon::Id))
                    .col(string_len(Coupon::Code, 64).unique_key().not_null())
                    .col(text(Coupon::Description).not_null())
                    .col(double(Coupon::Discount).not_null())
                    .col(string_len(Coupon::DiscountType, 16).not_null())
                    .col(timestamp_with_time_zone(Coupon::ValidFrom).not_null())
                    .col(timestamp_with_time_zone(Coupon::ValidUntil).not_null())
                    .col(timestamp_with_time_zone(Coupon::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Coupon::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Coupon {
    Table,
    Id,
    Code,
    Description,
    Discount,
    DiscountType,
    ValidFrom,
    ValidUntil,
    CreatedAt,
}
