use sea_orm::{entity::prelude::*, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::{coupon, customer};

/// Link row granting a coupon to a customer. No attributes besides the key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_coupon")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub customer_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub coupon_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
    Coupon,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Coupon => Entity::belongs_to(coupon::Entity)
                .from(Column::CouponId)
                .to(coupon::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<coupon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coupon.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCouponCreate {
    pub customer_id: i32,
    pub coupon_id: i32,
}

impl IntoActiveModel<ActiveModel> for CustomerCouponCreate {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel { customer_id: Set(self.customer_id), coupon_id: Set(self.coupon_id) }
    }
}

/// The link has no mutable columns.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct CustomerCouponUpdate {}

/// Composite key, also used to extract `/{customer_id}/{coupon_id}` paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerCouponKey {
    pub customer_id: i32,
    pub coupon_id: i32,
}

impl From<Model> for CustomerCouponKey {
    fn from(m: Model) -> Self {
        Self { customer_id: m.customer_id, coupon_id: m.coupon_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_sets_both_key_columns() {
        let am = CustomerCouponCreate { customer_id: 3, coupon_id: 7 }.into_active_model();
        assert_eq!(am.customer_id.unwrap(), 3);
        assert_eq!(am.coupon_id.unwrap(), 7);
    }

    #[test]
    fn create_requires_both_ids() {
        assert!(serde_json::from_str::<CustomerCouponCreate>(r#"{"customer_id":1}"#).is_err());
        assert!(serde_json::from_str::<CustomerCouponCreate>(r#"{"customer_id":1,"coupon_id":"x"}"#).is_err());
    }
}
