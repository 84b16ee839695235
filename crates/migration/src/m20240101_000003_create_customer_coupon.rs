//! Create `customer_coupon` link table with a composite primary key.
//!
//! Both foreign keys cascade: deleting a customer or a coupon removes its links.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomerCoupon::Table)
                    .if_not_exists()
                    .col(integer(CustomerCoupon::CustomerId).not_null())
                    .col(integer(CustomerCoupon::CouponId).not_null())
                    .primary_key(
                        Index::create()
                            .col(CustomerCoupon::CustomerId)
                            .col(CustomerCoupon::CouponId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_coupon_customer")
                            .from(CustomerCoupon::Table, CustomerCoupon::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_customer_coupon_coupon")
                            .from(CustomerCoupon::Table, CustomerCoupon::CouponId)
                            .to(Coupon::Table, Coupon::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomerCoupon::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CustomerCoupon { Table, CustomerId, CouponId }

#[derive(DeriveIden)]
enum Customer { Table, Id }

#[derive(DeriveIden)]
enum Coupon { Table, Id }
