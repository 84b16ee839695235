//! Router assembly. Each collection is mounted from a `RouteConfig` naming
//! its prefix and the endpoints to expose.
use axum::{routing::MethodRouter, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{openapi, state::AppState};

pub mod coupon;
pub mod customer;
pub mod customer_coupon;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /`
    List,
    /// `POST /`
    Create,
    /// `GET /{key}`
    Get,
    /// `PUT /{key}`
    Update,
    /// `DELETE /{key}`
    Delete,
    /// `GET /{id}/status`, coupons only
    Status,
    /// `GET /{id}/customers`, coupons only
    Customers,
    /// `GET /{id}/coupons`, customers only
    Coupons,
}

impl Endpoint {
    pub const ALL: [Endpoint; 8] = [
        Endpoint::List,
        Endpoint::Create,
        Endpoint::Get,
        Endpoint::Update,
        Endpoint::Delete,
        Endpoint::Status,
        Endpoint::Customers,
        Endpoint::Coupons,
    ];
}

/// Mount point and enabled endpoints of one collection. Endpoints a
/// collection does not support are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteConfig {
    pub prefix: String,
    pub endpoints: Vec<Endpoint>,
}

impl RouteConfig {
    /// Every endpoint enabled.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_endpoints(prefix, Endpoint::ALL)
    }

    pub fn with_endpoints(prefix: impl Into<String>, endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        Self { prefix: prefix.into(), endpoints: endpoints.into_iter().collect() }
    }

    pub fn without(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.retain(|e| *e != endpoint);
        self
    }

    pub fn enabled(&self, endpoint: Endpoint) -> bool {
        self.endpoints.contains(&endpoint)
    }

    pub(crate) fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix, suffix)
    }

    /// Registers `methods` on the collection path, with and without the trailing slash.
    pub(crate) fn mount_collection(
        &self,
        router: Router<AppState>,
        methods: Option<MethodRouter<AppState>>,
    ) -> Router<AppState> {
        match methods {
            Some(m) => router.route(&self.prefix, m.clone()).route(&self.path("/"), m),
            None => router,
        }
    }
}

/// Route configuration of the three collections; `None` leaves one unmounted.
#[derive(Clone, Debug)]
pub struct ApiRoutes {
    pub coupon: Option<RouteConfig>,
    pub customer: Option<RouteConfig>,
    pub customer_coupon: Option<RouteConfig>,
}

impl ApiRoutes {
    /// All collections under `api_prefix` (e.g. `/api/v1`) with every endpoint.
    pub fn with_prefix(api_prefix: &str) -> Self {
        Self {
            coupon: Some(RouteConfig::new(format!("{api_prefix}/coupon"))),
            customer: Some(RouteConfig::new(format!("{api_prefix}/customer"))),
            customer_coupon: Some(RouteConfig::new(format!("{api_prefix}/customer-coupon"))),
        }
    }
}

/// Chains `route` onto `methods` when `enabled`.
pub(crate) fn add_method(
    methods: Option<MethodRouter<AppState>>,
    enabled: bool,
    route: impl FnOnce(MethodRouter<AppState>) -> MethodRouter<AppState>,
) -> Option<MethodRouter<AppState>> {
    if !enabled {
        return methods;
    }
    Some(route(methods.unwrap_or_else(MethodRouter::new)))
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Collection routes only, without state or middleware.
pub fn api_router(routes: &ApiRoutes) -> Router<AppState> {
    let mut router = Router::new();
    if let Some(cfg) = &routes.coupon {
        router = router.merge(coupon::router(cfg));
    }
    if let Some(cfg) = &routes.customer {
        router = router.merge(customer::router(cfg));
    }
    if let Some(cfg) = &routes.customer_coupon {
        router = router.merge(customer_coupon::router(cfg));
    }
    router
}

/// Full application: collections, `/health`, API docs, CORS and request tracing.
pub fn build_router(state: AppState, routes: &ApiRoutes, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health))
        .merge(api_router(routes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::document(routes)))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
