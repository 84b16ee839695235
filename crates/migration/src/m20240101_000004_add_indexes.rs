use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Customer: lookups by display name
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customer_name")
                    .table(Customer::Table)
                    .col(Customer::Name)
                    .to_owned(),
            )
            .await?;

        // CustomerCoupon: reverse lookup coupon -> customers
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_customer_coupon_coupon")
                    .table(CustomerCoupon::Table)
                    .col(CustomerCoupon::CouponId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_customer_coupon_coupon").table(CustomerCoupon::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_customer_name").table(Customer::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Customer { Table, Name }

#[derive(DeriveIden)]
enum CustomerCoupon { Table, CouponId }
