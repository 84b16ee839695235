//! OpenAPI document. Schemas mirror the `models` shapes so the models crate
//! stays free of doc dependencies.
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::routes::ApiRoutes;

/// Prefix the handler annotations are written against.
pub const DOC_PREFIX: &str = "/api/v1";

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub detail: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiscountTypeDoc {
    Fix,
    Percent,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatusValueDoc {
    Valid,
    Invalid,
}

#[derive(ToSchema)]
pub struct CouponStatusDoc {
    pub status: CouponStatusValueDoc,
}

#[derive(ToSchema)]
pub struct CouponDoc {
    pub id: i32,
    pub code: String,
    pub description: String,
    pub discount: f64,
    pub discount_type: DiscountTypeDoc,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// `code` must match `[A-Z]+[A-Z0-9]{3,}`, `discount` must be positive.
/// Timestamps without offset are taken as UTC.
#[derive(ToSchema)]
pub struct CouponCreateDoc {
    #[schema(example = "SUMMER24")]
    pub code: String,
    pub description: String,
    #[schema(example = 10.0)]
    pub discount: f64,
    pub discount_type: DiscountTypeDoc,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

#[derive(ToSchema)]
pub struct CouponUpdateDoc {
    pub description: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
}

#[derive(ToSchema)]
pub struct CustomerDoc {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// `username` must match `[a-z]+[a-z0-9-.]{2,}`.
#[derive(ToSchema)]
pub struct CustomerCreateDoc {
    #[schema(example = "jack")]
    pub username: String,
    #[schema(example = "Jack")]
    pub name: String,
}

#[derive(ToSchema)]
pub struct CustomerUpdateDoc {
    pub name: Option<String>,
}

#[derive(ToSchema)]
pub struct CustomerCouponDoc {
    pub customer_id: i32,
    pub coupon_id: i32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::coupon::list,
        crate::routes::coupon::create,
        crate::routes::coupon::get_by_id,
        crate::routes::coupon::update_by_id,
        crate::routes::coupon::delete_by_id,
        crate::routes::coupon::status,
        crate::routes::coupon::customers,
        crate::routes::customer::list,
        crate::routes::customer::create,
        crate::routes::customer::get_by_id,
        crate::routes::customer::update_by_id,
        crate::routes::customer::delete_by_id,
        crate::routes::customer::coupons,
        crate::routes::customer_coupon::list,
        crate::routes::customer_coupon::create,
        crate::routes::customer_coupon::get_by_key,
        crate::routes::customer_coupon::delete_by_key,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            DiscountTypeDoc,
            CouponStatusValueDoc,
            CouponStatusDoc,
            CouponDoc,
            CouponCreateDoc,
            CouponUpdateDoc,
            CustomerDoc,
            CustomerCreateDoc,
            CustomerUpdateDoc,
            CustomerCouponDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "coupon"),
        (name = "customer"),
        (name = "customer-coupon")
    )
)]
pub struct ApiDoc;

/// `ApiDoc` with collection paths moved under the prefixes of `routes`.
/// Collections that are not mounted are dropped.
pub fn document(routes: &ApiRoutes) -> utoipa::openapi::OpenApi {
    let mounts = [
        (format!("{DOC_PREFIX}/coupon"), routes.coupon.as_ref()),
        (format!("{DOC_PREFIX}/customer"), routes.customer.as_ref()),
        (format!("{DOC_PREFIX}/customer-coupon"), routes.customer_coupon.as_ref()),
    ];
    let mut doc = ApiDoc::openapi();
    let paths = std::mem::take(&mut doc.paths.paths);
    doc.paths.paths = paths
        .into_iter()
        .filter_map(|(path, item)| {
            let moved = mounts.iter().find_map(|(documented, cfg)| {
                collection_suffix(&path, documented).map(|rest| cfg.map(|cfg| format!("{}{rest}", cfg.prefix)))
            });
            match moved {
                Some(Some(mounted)) => Some((mounted, item)),
                Some(None) => None,
                None => Some((path, item)),
            }
        })
        .collect();
    doc
}

fn collection_suffix<'a>(path: &'a str, collection: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(collection)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_collection_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for p in [
            "/health",
            "/api/v1/coupon/",
            "/api/v1/coupon/{id}/status",
            "/api/v1/customer/{id}/coupons",
            "/api/v1/customer-coupon/{customer_id}/{coupon_id}",
        ] {
            assert!(paths.contains_key(p), "missing {p}");
        }
    }

    #[test]
    fn document_follows_mounted_prefixes() {
        let mut routes = ApiRoutes::with_prefix("/v2");
        routes.customer_coupon = None;
        let doc = document(&routes);
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/v2/coupon/{id}/status"));
        assert!(paths.contains_key("/v2/customer/"));
        assert!(paths.contains_key("/v2/customer/{id}/coupons"));
        assert!(paths.keys().all(|p| !p.starts_with(DOC_PREFIX)), "{:?}", paths.keys());
        assert!(paths.keys().all(|p| !p.contains("customer-coupon")));
    }

    #[test]
    fn default_prefix_keeps_documented_paths() {
        let doc = document(&ApiRoutes::with_prefix(DOC_PREFIX));
        assert_eq!(
            doc.paths.paths.keys().collect::<Vec<_>>(),
            ApiDoc::openapi().paths.paths.keys().collect::<Vec<_>>()
        );
    }
}
