use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use models::coupon::CouponStatusResponse;
use models::{coupon, customer, CouponCreate, CouponUpdate};
use service::CouponService;
use tracing::info;

use crate::{
    errors::{JsonApiError, Resource},
    extract::{ApiJson, ApiPath},
    routes::{add_method, Endpoint, RouteConfig},
    state::AppState,
};

fn fail(action: &'static str) -> impl FnOnce(service::ServiceError) -> JsonApiError {
    move |e| JsonApiError::from_service(e, Resource::Coupon, action)
}

pub fn router(cfg: &RouteConfig) -> Router<AppState> {
    let mut collection = None;
    collection = add_method(collection, cfg.enabled(Endpoint::List), |m| m.get(list));
    collection = add_method(collection, cfg.enabled(Endpoint::Create), |m| m.post(create));

    let mut item = None;
    item = add_method(item, cfg.enabled(Endpoint::Get), |m| m.get(get_by_id));
    item = add_method(item, cfg.enabled(Endpoint::Update), |m| m.put(update_by_id));
    item = add_method(item, cfg.enabled(Endpoint::Delete), |m| m.delete(delete_by_id));

    let mut router = cfg.mount_collection(Router::new(), collection);
    if let Some(m) = item {
        router = router.route(&cfg.path("/:id"), m);
    }
    if cfg.enabled(Endpoint::Status) {
        router = router.route(&cfg.path("/:id/status"), get(status));
    }
    if cfg.enabled(Endpoint::Customers) {
        router = router.route(&cfg.path("/:id/customers"), get(customers));
    }
    router
}

#[utoipa::path(
    get, path = "/api/v1/coupon/", tag = "coupon",
    responses((status = 200, description = "All coupons", body = [crate::openapi::CouponDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<coupon::Model>>, JsonApiError> {
    let all = CouponService::new(&state.db).get_all().await.map_err(fail("list"))?;
    Ok(Json(all))
}

#[utoipa::path(
    post, path = "/api/v1/coupon/", tag = "coupon",
    request_body = crate::openapi::CouponCreateDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CouponDoc),
        (status = 400, description = "Commit failed", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Invalid body", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CouponCreate>,
) -> Result<Json<coupon::Model>, JsonApiError> {
    let created = CouponService::new(&state.db).create(input).await.map_err(fail("create"))?;
    info!(id = created.id, code = %created.code, "created coupon");
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/api/v1/coupon/{id}", tag = "coupon",
    params(("id" = i32, Path, description = "Coupon ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CouponDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<coupon::Model>, JsonApiError> {
    CouponService::new(&state.db)
        .get_by_key(id)
        .await
        .map_err(fail("read"))?
        .map(Json)
        .ok_or_else(|| JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some("Coupon not found.".into())))
}

#[utoipa::path(
    put, path = "/api/v1/coupon/{id}", tag = "coupon",
    params(("id" = i32, Path, description = "Coupon ID")),
    request_body = crate::openapi::CouponUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CouponDoc),
        (status = 400, description = "Commit failed", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<CouponUpdate>,
) -> Result<Json<coupon::Model>, JsonApiError> {
    let updated = CouponService::new(&state.db).update(id, input).await.map_err(fail("update"))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/v1/coupon/{id}", tag = "coupon",
    params(("id" = i32, Path, description = "Coupon ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Commit failed", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, JsonApiError> {
    CouponService::new(&state.db).delete_by_key(id).await.map_err(fail("delete"))?;
    info!(id, "deleted coupon");
    Ok(StatusCode::OK)
}

/// Status at the time of the request.
#[utoipa::path(
    get, path = "/api/v1/coupon/{id}/status", tag = "coupon",
    params(("id" = i32, Path, description = "Coupon ID")),
    responses(
        (status = 200, description = "Current status", body = crate::openapi::CouponStatusDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<CouponStatusResponse>, JsonApiError> {
    let status = CouponService::new(&state.db).status_by_id(id).await.map_err(fail("read"))?;
    Ok(Json(CouponStatusResponse { status }))
}

#[utoipa::path(
    get, path = "/api/v1/coupon/{id}/customers", tag = "coupon",
    params(("id" = i32, Path, description = "Coupon ID")),
    responses(
        (status = 200, description = "Customers holding the coupon", body = [crate::openapi::CustomerDoc]),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn customers(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<customer::Model>>, JsonApiError> {
    let holders = CouponService::new(&state.db).customers_by_id(id).await.map_err(fail("read"))?;
    Ok(Json(holders))
}
