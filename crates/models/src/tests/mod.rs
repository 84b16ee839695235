

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel};

use crate::{coupon, customer, CouponCreate, CustomerCreate, DiscountType};

pub(crate) async fn insert_customer(db: &DatabaseConnection, username: &str) -> anyhow::Result<customer::Model> {
    let input = CustomerCreate::new(username, &username.to_uppercase())?;
    Ok(input.into_active_model().insert(db).await?)
}

pub(crate) async fn insert_coupon(db: &DatabaseConnection, code: &str) -> anyhow::Result<coupon::Model> {
    let now = Utc::now();
    let input = CouponCreate {
        code: coupon::CouponCode::parse(code)?,
        description: format!("{code} description"),
        discount: coupon::Discount::new(5.0)?,
        discount_type: DiscountType::Percent,
        valid_from: now.into(),
        valid_until: (now + Duration::days(7)).into(),
    };
    Ok(input.into_active_model().insert(db).await?)
}
