#![cfg(test)]
use chrono::{DateTime, Duration, Utc};
use models::coupon::{CouponCode, Discount};
use models::{CouponCreate, DiscountType};
use sea_orm::DatabaseConnection;

/// Fresh in-memory database with migrations applied. Each call is isolated.
pub async fn memory_db() -> DatabaseConnection {
    models::db::connect_in_memory().await.expect("in-memory database")
}

pub fn coupon_input(code: &str, valid_from: DateTime<Utc>, valid_until: DateTime<Utc>) -> CouponCreate {
    CouponCreate {
        code: CouponCode::parse(code).expect("valid code"),
        description: format!("{code} coupon"),
        discount: Discount::new(10.0).expect("positive discount"),
        discount_type: DiscountType::Percent,
        valid_from: valid_from.into(),
        valid_until: valid_until.into(),
    }
}

/// Coupon valid for one week starting now.
pub fn current_coupon(code: &str) -> CouponCreate {
    let now = Utc::now();
    coupon_input(code, now - Duration::minutes(1), now + Duration::days(7))
}
