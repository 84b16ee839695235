use axum::{extract::State, http::StatusCode, Json, Router};
use models::{customer_coupon, CustomerCouponCreate, CustomerCouponKey};
use service::CustomerCouponService;
use tracing::info;

use crate::{
    errors::{JsonApiError, Resource},
    extract::{ApiJson, ApiPath},
    routes::{add_method, Endpoint, RouteConfig},
    state::AppState,
};

fn fail(action: &'static str) -> impl FnOnce(service::ServiceError) -> JsonApiError {
    move |e| JsonApiError::from_service(e, Resource::CustomerCoupon, action)
}

/// The link has no updatable fields, so `Endpoint::Update` is ignored.
pub fn router(cfg: &RouteConfig) -> Router<AppState> {
    let mut collection = None;
    collection = add_method(collection, cfg.enabled(Endpoint::List), |m| m.get(list));
    collection = add_method(collection, cfg.enabled(Endpoint::Create), |m| m.post(create));

    let mut item = None;
    item = add_method(item, cfg.enabled(Endpoint::Get), |m| m.get(get_by_key));
    item = add_method(item, cfg.enabled(Endpoint::Delete), |m| m.delete(delete_by_key));

    let mut router = cfg.mount_collection(Router::new(), collection);
    if let Some(m) = item {
        router = router.route(&cfg.path("/:customer_id/:coupon_id"), m);
    }
    router
}

#[utoipa::path(
    get, path = "/api/v1/customer-coupon/", tag = "customer-coupon",
    responses((status = 200, description = "All links", body = [crate::openapi::CustomerCouponDoc]))
)]
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<customer_coupon::Model>>, JsonApiError> {
    let all = CustomerCouponService::new(&state.db).get_all().await.map_err(fail("list"))?;
    Ok(Json(all))
}

#[utoipa::path(
    post, path = "/api/v1/customer-coupon/", tag = "customer-coupon",
    request_body = crate::openapi::CustomerCouponDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CustomerCouponDoc),
        (status = 400, description = "Unknown customer or coupon, or duplicate link", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Invalid body", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CustomerCouponCreate>,
) -> Result<Json<customer_coupon::Model>, JsonApiError> {
    let created = CustomerCouponService::new(&state.db).create(input).await.map_err(fail("create"))?;
    info!(customer_id = created.customer_id, coupon_id = created.coupon_id, "linked coupon to customer");
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/api/v1/customer-coupon/{customer_id}/{coupon_id}", tag = "customer-coupon",
    params(
        ("customer_id" = i32, Path, description = "Customer ID"),
        ("coupon_id" = i32, Path, description = "Coupon ID")
    ),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CustomerCouponDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_by_key(
    State(state): State<AppState>,
    ApiPath(key): ApiPath<CustomerCouponKey>,
) -> Result<Json<customer_coupon::Model>, JsonApiError> {
    CustomerCouponService::new(&state.db)
        .get_by_key(key)
        .await
        .map_err(fail("read"))?
        .map(Json)
        .ok_or_else(|| {
            JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some("Customer coupon link not found.".into()))
        })
}

#[utoipa::path(
    delete, path = "/api/v1/customer-coupon/{customer_id}/{coupon_id}", tag = "customer-coupon",
    params(
        ("customer_id" = i32, Path, description = "Customer ID"),
        ("coupon_id" = i32, Path, description = "Coupon ID")
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Commit failed", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_by_key(
    State(state): State<AppState>,
    ApiPath(key): ApiPath<CustomerCouponKey>,
) -> Result<StatusCode, JsonApiError> {
    CustomerCouponService::new(&state.db).delete_by_key(key).await.map_err(fail("delete"))?;
    info!(customer_id = key.customer_id, coupon_id = key.coupon_id, "unlinked coupon from customer");
    Ok(StatusCode::OK)
}
