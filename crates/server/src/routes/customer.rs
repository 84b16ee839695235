use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use models::{coupon, customer, CustomerCreate, CustomerUpdate};
use service::CustomerService;
use tracing::info;

use crate::{
    errors::{JsonApiError, Resource},
    extract::{ApiJson, ApiPath},
    routes::{add_method, Endpoint, RouteConfig},
    state::AppState,
};

fn fail(action: &'static str) -> impl FnOnce(service::ServiceError) -> JsonApiError {
    move |e| JsonApiError::from_service(e, Resource::Customer, action)
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
    if cfg.enabled(Endpoint::Coupons) {
        router = router.route(&cfg.path("/:id/coupons"), get(coupons));
    }
    router
}

#[utoipa::path(
    get, path = "/api/v1/customer/", tag = "customer",
    responses((status = 200, description = "All customers", body = [crate::openapi::CustomerDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<customer::Model>>, JsonApiError> {
    let all = CustomerService::new(&state.db).get_all().await.map_err(fail("list"))?;
    Ok(Json(all))
}

#[utoipa::path(
    post, path = "/api/v1/customer/", tag = "customer",
    request_body = crate::openapi::CustomerCreateDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Username already in use", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Invalid body", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CustomerCreate>,
) -> Result<Json<customer::Model>, JsonApiError> {
    let created = CustomerService::new(&state.db).create(input).await.map_err(fail("create"))?;
    info!(id = created.id, username = %created.username, "created customer");
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/api/v1/customer/{id}", tag = "customer",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CustomerDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<customer::Model>, JsonApiError> {
    CustomerService::new(&state.db)
        .get_by_key(id)
        .await
        .map_err(fail("read"))?
        .map(Json)
        .ok_or_else(|| JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some("Customer not found.".into())))
}

#[utoipa::path(
    put, path = "/api/v1/customer/{id}", tag = "customer",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = crate::openapi::CustomerUpdateDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CustomerDoc),
        (status = 400, description = "Commit failed", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<CustomerUpdate>,
) -> Result<Json<customer::Model>, JsonApiError> {
    let updated = CustomerService::new(&state.db).update(id, input).await.map_err(fail("update"))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/v1/customer/{id}", tag = "customer",
    params(("id" = i32, Path, description = "Customer ID")),
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
    CustomerService::new(&state.db).delete_by_key(id).await.map_err(fail("delete"))?;
    info!(id, "deleted customer");
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get, path = "/api/v1/customer/{id}/coupons", tag = "customer",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Coupons granted to the customer", body = [crate::openapi::CouponDoc]),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn coupons(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<coupon::Model>>, JsonApiError> {
    let held = CustomerService::new(&state.db).coupons_by_id(id).await.map_err(fail("read"))?;
    Ok(Json(held))
}
