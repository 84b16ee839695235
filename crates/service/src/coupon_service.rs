use chrono::{DateTime, Utc};
use models::{coupon, customer, CouponCreate, CouponStatus, CouponUpdate};
use sea_orm::{ModelTrait, Set};

use crate::{
    crud::{Patch, Service},
    errors::ServiceError,
};

pub type CouponService<'db> = Service<'db, coupon::Entity, CouponCreate, CouponUpdate, i32>;

impl Patch<coupon::ActiveModel> for CouponUpdate {
    fn apply(self, am: &mut coupon::ActiveModel) {
        if let Some(description) = self.description {
            am.description = Set(description);
        }
        if let Some(valid_until) = self.valid_until {
            am.valid_until = Set(valid_until.into_inner());
        }
    }
}

impl<'db> CouponService<'db> {
    async fn require(&self, id: i32) -> Result<coupon::Model, ServiceError> {
        self.get_by_key(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("coupon", id.to_string()))
    }

    /// Status of the coupon at the time of the call.
    pub async fn status_by_id(&self, id: i32) -> Result<CouponStatus, ServiceError> {
        self.status_at(id, Utc::now()).await
    }

    pub async fn status_at(&self, id: i32, now: DateTime<Utc>) -> Result<CouponStatus, ServiceError> {
        Ok(self.require(id).await?.status_at(now))
    }

    /// Customers holding the coupon.
    pub async fn customers_by_id(&self, id: i32) -> Result<Vec<customer::Model>, ServiceError> {
        let coupon = self.require(id).await?;
        coupon.find_related(customer::Entity).all(self.db()).await.map_err(ServiceError::db)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use models::{CouponStatus, CouponUpdate, CustomerCouponCreate, CustomerCreate, UtcDateTime};

    use super::CouponService;
    use crate::test_support::{coupon_input, current_coupon, memory_db};
    use crate::{CommitError, CustomerCouponService, CustomerService, ServiceError};

    #[tokio::test]
    async fn coupon_lifecycle() {
        let db = memory_db().await;
        let svc = CouponService::new(&db);

        let created = svc.create(current_coupon("ABCDEF1")).await.unwrap();
        assert_eq!(created.code, "ABCDEF1");
        assert_eq!(created.discount, 10.0);
        assert_eq!(svc.get_by_key(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(svc.get_all().await.unwrap().len(), 1);

        let new_end = Utc::now() + Duration::days(30);
        let updated = svc
            .update(
                created.id,
                CouponUpdate { description: Some("updated".into()), valid_until: Some(UtcDateTime::from(new_end)) },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, "updated");
        assert_eq!(updated.valid_until, new_end);
        assert_eq!(updated.code, created.code);
        assert_eq!(updated.valid_from, created.valid_from);
        assert_eq!(updated.created_at, created.created_at);

        svc.delete_by_key(created.id).await.unwrap();
        assert!(svc.get_by_key(created.id).await.unwrap().is_none());
        assert!(svc.delete_by_key(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn duplicate_code_fails_to_commit() {
        let db = memory_db().await;
        let svc = CouponService::new(&db);
        svc.create(current_coupon("ABCD")).await.unwrap();

        let err = svc.create(current_coupon("ABCD")).await.unwrap_err();
        assert!(
            matches!(err, ServiceError::CommitFailed(CommitError::UniqueViolation(_))),
            "{err:?}"
        );
        assert_eq!(svc.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn status_follows_half_open_window() {
        let db = memory_db().await;
        let svc = CouponService::new(&db);
        let from = Utc.with_ymd_and_hms(2030, 5, 1, 12, 0, 0).unwrap();
        let until = from + Duration::days(7);
        let c = svc.create(coupon_input("WINDOW1", from, until)).await.unwrap();

        let cases = [
            (from - Duration::seconds(1), CouponStatus::Invalid),
            (from, CouponStatus::Valid),
            (until - Duration::seconds(1), CouponStatus::Valid),
            (until, CouponStatus::Invalid),
        ];
        for (t, expected) in cases {
            assert_eq!(svc.status_at(c.id, t).await.unwrap(), expected, "at {t}");
        }

        assert_eq!(svc.status_by_id(c.id).await.unwrap(), CouponStatus::Invalid);
    }

    #[tokio::test]
    async fn current_coupon_is_valid_now() {
        let db = memory_db().await;
        let svc = CouponService::new(&db);
        let c = svc.create(current_coupon("NOWVALID")).await.unwrap();
        assert_eq!(svc.status_by_id(c.id).await.unwrap(), CouponStatus::Valid);
    }

    #[tokio::test]
    async fn status_of_missing_coupon_is_not_found() {
        let db = memory_db().await;
        let svc = CouponService::new(&db);
        assert!(svc.status_by_id(7).await.unwrap_err().is_not_found());
        assert!(svc.customers_by_id(7).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn customers_by_id_follows_links() {
        let db = memory_db().await;
        let coupons = CouponService::new(&db);
        let customers = CustomerService::new(&db);
        let links = CustomerCouponService::new(&db);

        let c = coupons.create(current_coupon("SHARED1")).await.unwrap();
        let lonely = coupons.create(current_coupon("LONELY1")).await.unwrap();
        let jack = customers.create(CustomerCreate::new("jack", "Jack").unwrap()).await.unwrap();
        let jill = customers.create(CustomerCreate::new("jill", "Jill").unwrap()).await.unwrap();
        for cu in [&jack, &jill] {
            links.create(CustomerCouponCreate { customer_id: cu.id, coupon_id: c.id }).await.unwrap();
        }

        let mut holders: Vec<String> =
            coupons.customers_by_id(c.id).await.unwrap().into_iter().map(|m| m.username).collect();
        holders.sort();
        assert_eq!(holders, ["jack", "jill"]);
        assert!(coupons.customers_by_id(lonely.id).await.unwrap().is_empty());
    }
}
