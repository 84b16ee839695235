use models::{customer_coupon, CustomerCouponCreate, CustomerCouponKey, CustomerCouponUpdate};

use crate::{
    crud::{EntityKey, Patch, Service},
    key::PrimaryKey,
};

pub type CustomerCouponService<'db> =
    Service<'db, customer_coupon::Entity, CustomerCouponCreate, CustomerCouponUpdate, CustomerCouponKey>;

impl Patch<customer_coupon::ActiveModel> for CustomerCouponUpdate {
    fn apply(self, _am: &mut customer_coupon::ActiveModel) {}
}

impl EntityKey<customer_coupon::Entity> for CustomerCouponKey {
    fn value(&self) -> (i32, i32) {
        (self.customer_id, self.coupon_id)
    }

    fn primary_key(&self) -> PrimaryKey {
        PrimaryKey::named([("customer_id", self.customer_id), ("coupon_id", self.coupon_id)])
    }
}

impl EntityKey<customer_coupon::Entity> for (i32, i32) {
    fn value(&self) -> (i32, i32) {
        *self
    }

    fn primary_key(&self) -> PrimaryKey {
        PrimaryKey::Tuple(vec![self.0.into(), self.1.into()])
    }
}
