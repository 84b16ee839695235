use models::{coupon, customer, CustomerCreate, CustomerUpdate};
use sea_orm::{ModelTrait, Set};

use crate::{
    crud::{Patch, Service},
    errors::ServiceError,
};

pub type CustomerService<'db> = Service<'db, customer::Entity, CustomerCreate, CustomerUpdate, i32>;

impl Patch<customer::ActiveModel> for CustomerUpdate {
    fn apply(self, am: &mut customer::ActiveModel) {
        if let Some(name) = self.name {
            am.name = Set(name);
        }
    }
}

impl<'db> CustomerService<'db> {
    /// Coupons granted to the customer.
    pub async fn coupons_by_id(&self, id: i32) -> Result<Vec<coupon::Model>, ServiceError> {
        let customer = self
            .get_by_key(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("customer", id.to_string()))?;
        customer.find_related(coupon::Entity).all(self.db()).await.map_err(ServiceError::db)
    }
}

#[cfg(test)]
mod tests {
    use models::{CustomerCouponCreate, CustomerCreate, CustomerUpdate};

    use super::CustomerService;
    use crate::test_support::{current_coupon, memory_db};
    use crate::{CommitError, CouponService, CustomerCouponService, ServiceError};

    #[tokio::test]
    async fn first_customer_gets_id_one() {
        let db = memory_db().await;
        let svc = CustomerService::new(&db);

        let jack = svc.create(CustomerCreate::new("jack", "Jack").unwrap()).await.unwrap();
        assert_eq!(jack.id, 1);
        assert_eq!(jack.username, "jack");
        assert_eq!(jack.name, "Jack");

        let all = svc.get_all().await.unwrap();
        assert_eq!(all, vec![jack.clone()]);

        let renamed = svc.update(1, CustomerUpdate { name: Some("Jack Black".into()) }).await.unwrap();
        assert_eq!(renamed.name, "Jack Black");
        assert_eq!(renamed.username, "jack");

        svc.delete_by_key(1).await.unwrap();
        assert!(svc.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_username_fails_to_commit() {
        let db = memory_db().await;
        let svc = CustomerService::new(&db);
        svc.create(CustomerCreate::new("jack", "Jack").unwrap()).await.unwrap();

        let err = svc.create(CustomerCreate::new("jack", "Jack Two").unwrap()).await.unwrap_err();
        assert!(
            matches!(err, ServiceError::CommitFailed(CommitError::UniqueViolation(_))),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn coupons_by_id_follows_links() {
        let db = memory_db().await;
        let customers = CustomerService::new(&db);
        let coupons = CouponService::new(&db);
        let links = CustomerCouponService::new(&db);

        let jack = customers.create(CustomerCreate::new("jack", "Jack").unwrap()).await.unwrap();
        assert!(customers.coupons_by_id(jack.id).await.unwrap().is_empty());

        let a = coupons.create(current_coupon("AAAA1")).await.unwrap();
        coupons.create(current_coupon("BBBB1")).await.unwrap();
        links.create(CustomerCouponCreate { customer_id: jack.id, coupon_id: a.id }).await.unwrap();

        let held = customers.coupons_by_id(jack.id).await.unwrap();
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].code, "AAAA1");

        assert!(customers.coupons_by_id(42).await.unwrap_err().is_not_found());
    }
}
