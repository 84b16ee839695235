//! Seed data for local runs.
use chrono::{DateTime, Duration, Utc};
use models::coupon::{CouponCode, Discount};
use models::{coupon, customer, customer_coupon, CouponCreate, CustomerCreate, DiscountType};
use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use tracing::info;

use crate::{CouponService, CustomerService, ServiceError};

pub const DEMO: &str = "demo";

const DEMO_CUSTOMERS: usize = 10;
const DEMO_COUPONS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixtureSummary {
    pub customers: usize,
    pub coupons: usize,
}

/// Runs the fixture registered under `id`.
pub async fn run(db: &DatabaseConnection, id: &str) -> anyhow::Result<FixtureSummary> {
    match id {
        DEMO => Ok(run_demo(db, Utc::now()).await?),
        other => anyhow::bail!("unknown fixture: {other} (available: {DEMO})"),
    }
}

/// Wipes all tables, then creates 10 customers and 20 coupons.
///
/// Coupon `i` becomes valid `7 + 2i` days after `now` and stays valid for a week.
pub async fn run_demo(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<FixtureSummary, ServiceError> {
    clear(db).await?;

    let customers = CustomerService::new(db);
    for i in 0..DEMO_CUSTOMERS {
        let input = CustomerCreate::new(&format!("customer{i}"), &format!("Customer {i}"))?;
        customers.create(input).await?;
    }

    let coupons = CouponService::new(db);
    for i in 0..DEMO_COUPONS {
        coupons.create(demo_coupon(i, now)?).await?;
    }

    info!(customers = DEMO_CUSTOMERS, coupons = DEMO_COUPONS, "demo fixture loaded");
    Ok(FixtureSummary { customers: DEMO_CUSTOMERS, coupons: DEMO_COUPONS })
}

async fn clear(db: &DatabaseConnection) -> Result<(), ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::unavailable)?;
    customer_coupon::Entity::delete_many().exec(&txn).await.map_err(ServiceError::commit)?;
    coupon::Entity::delete_many().exec(&txn).await.map_err(ServiceError::commit)?;
    customer::Entity::delete_many().exec(&txn).await.map_err(ServiceError::commit)?;
    txn.commit().await.map_err(ServiceError::commit)
}

fn demo_coupon(i: usize, now: DateTime<Utc>) -> Result<CouponCreate, ServiceError> {
    let valid_from = now + Duration::days(7 + 2 * i as i64);
    Ok(CouponCreate {
        code: CouponCode::parse(&format!("ABCDEFG{i}"))?,
        description: format!("Fancy coupon {i}"),
        discount: Discount::new(42.0)?,
        discount_type: DiscountType::Fix,
        valid_from: valid_from.into(),
        valid_until: (valid_from + Duration::weeks(1)).into(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use models::{CouponStatus, CustomerCouponCreate};

    use super::*;
    use crate::test_support::memory_db;
    use crate::CustomerCouponService;

    #[tokio::test]
    async fn demo_creates_customers_and_coupons() {
        let db = memory_db().await;
        let now = Utc::now();
        let summary = run_demo(&db, now).await.unwrap();
        assert_eq!(summary, FixtureSummary { customers: 10, coupons: 20 });

        let customers = CustomerService::new(&db).get_all().await.unwrap();
        assert_eq!(customers.len(), 10);
        assert!(customers.iter().any(|c| c.username == "customer0" && c.name == "Customer 0"));

        let coupons = CouponService::new(&db);
        let all = coupons.get_all().await.unwrap();
        assert_eq!(all.len(), 20);
        let first = all.iter().find(|c| c.code == "ABCDEFG0").unwrap();
        assert_eq!(first.discount, 42.0);
        assert_eq!(first.discount_type, DiscountType::Fix);
        assert_eq!(coupons.status_at(first.id, now).await.unwrap(), CouponStatus::Invalid);
        assert_eq!(coupons.status_at(first.id, now + Duration::days(8)).await.unwrap(), CouponStatus::Valid);
        assert_eq!(coupons.status_at(first.id, now + Duration::days(14)).await.unwrap(), CouponStatus::Invalid);
    }

    #[tokio::test]
    async fn demo_replaces_existing_rows() {
        let db = memory_db().await;
        let now = Utc::now();
        run_demo(&db, now).await.unwrap();
        let c = CustomerService::new(&db).get_all().await.unwrap()[0].id;
        let k = CouponService::new(&db).get_all().await.unwrap()[0].id;
        CustomerCouponService::new(&db)
            .create(CustomerCouponCreate { customer_id: c, coupon_id: k })
            .await
            .unwrap();

        run_demo(&db, now).await.unwrap();
        assert_eq!(CustomerService::new(&db).get_all().await.unwrap().len(), 10);
        assert_eq!(CouponService::new(&db).get_all().await.unwrap().len(), 20);
        assert!(CustomerCouponService::new(&db).get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_fixture_is_an_error() {
        let db = memory_db().await;
        let err = run(&db, "nope").await.unwrap_err();
        assert!(err.to_string().contains("unknown fixture"));
        assert!(CustomerService::new(&db).get_all().await.unwrap().is_empty());
    }
}
