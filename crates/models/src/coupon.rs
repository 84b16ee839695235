use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{entity::prelude::*, ActiveValue::NotSet, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::{customer, customer_coupon, errors::ModelError, timestamp::UtcDateTime};

/// One or more capital letters followed by at least three capital letters or digits.
/// Matched against the whole code.
pub const CODE_PATTERN: &str = r"[A-Z]+[A-Z0-9]{3,}";

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^(?:{CODE_PATTERN})$")).expect("coupon code pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[sea_orm(string_value = "fix")]
    Fix,
    #[sea_orm(string_value = "percent")]
    Percent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    Valid,
    Invalid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponStatusResponse {
    pub status: CouponStatus,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coupon")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub discount: f64,
    pub discount_type: DiscountType,
    pub valid_from: DateTimeUtc,
    pub valid_until: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    CustomerCoupon,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CustomerCoupon => Entity::has_many(customer_coupon::Entity).into(),
        }
    }
}

impl Related<customer_coupon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerCoupon.def()
    }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef {
        customer_coupon::Relation::Customer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(customer_coupon::Relation::Coupon.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `valid_from` is inclusive, `valid_until` exclusive.
    pub fn status_at(&self, now: DateTime<Utc>) -> CouponStatus {
        if self.valid_from <= now && now < self.valid_until {
            CouponStatus::Valid
        } else {
            CouponStatus::Invalid
        }
    }
}

pub fn validate_code(code: &str) -> Result<(), ModelError> {
    if !CODE_RE.is_match(code) {
        return Err(ModelError::validation(format!("code must match {CODE_PATTERN}")));
    }
    Ok(())
}

pub fn validate_discount(discount: f64) -> Result<(), ModelError> {
    if !discount.is_finite() || discount <= 0.0 {
        return Err(ModelError::validation("discount must be greater than 0"));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct CouponCode(String);

impl CouponCode {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        Self::try_from(raw.to_string())
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for CouponCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_code(&value)?;
        Ok(Self(value))
    }
}

/// Strictly positive discount amount.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64")]
pub struct Discount(f64);

impl Discount {
    pub fn new(value: f64) -> Result<Self, ModelError> {
        Self::try_from(value)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Discount {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        validate_discount(value)?;
        Ok(Self(value))
    }
}

/// Creation shape; `id` and `created_at` are assigned by the server.
#[derive(Clone, Debug, Deserialize)]
pub struct CouponCreate {
    pub code: CouponCode,
    pub description: String,
    pub discount: Discount,
    pub discount_type: DiscountType,
    pub valid_from: UtcDateTime,
    pub valid_until: UtcDateTime,
}

impl IntoActiveModel<ActiveModel> for CouponCreate {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            code: Set(self.code.into_inner()),
            description: Set(self.description),
            discount: Set(self.discount.get()),
            discount_type: Set(self.discount_type),
            valid_from: Set(self.valid_from.into_inner()),
            valid_until: Set(self.valid_until.into_inner()),
            created_at: Set(Utc::now()),
        }
    }
}

/// Partial update; absent (or `null`) fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CouponUpdate {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub valid_until: Option<UtcDateTime>,
}
