use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::{CommitError, ServiceError};
use thiserror::Error;
use tracing::{error, warn};

/// Error body: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, title: title.into(), detail }
    }

    /// Maps a service failure while `action`-ing a `resource`.
    pub fn from_service(e: ServiceError, resource: Resource, action: &str) -> Self {
        match e {
            ServiceError::NotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                "Not Found",
                Some(format!("{} not found.", resource.title())),
            ),
            ServiceError::CommitFailed(CommitError::Connection(msg)) | ServiceError::Unavailable(msg) => {
                warn!(error = %msg, resource = resource.noun(), action, "store unavailable");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable", Some(msg))
            }
            ServiceError::CommitFailed(kind) => {
                let reason = match kind {
                    CommitError::UniqueViolation(_) => resource.unique_hint(),
                    CommitError::ForeignKeyViolation(_) => resource.reference_hint(),
                    _ => "The change was rejected by the database.",
                };
                Self::new(
                    StatusCode::BAD_REQUEST,
                    "Commit Failed",
                    Some(format!("Failed to {action} {}. {reason}", resource.noun())),
                )
            }
            ServiceError::Model(e) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(e.to_string()))
            }
            ServiceError::InvalidKey(e) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid Key", Some(e.to_string()))
            }
            ServiceError::Db(msg) => {
                error!(error = %msg, resource = resource.noun(), action, "database error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error", Some(msg))
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.title, "detail": self.detail});
        (self.status, Json(body)).into_response()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Coupon,
    Customer,
    CustomerCoupon,
}

impl Resource {
    fn title(self) -> &'static str {
        match self {
            Resource::Coupon => "Coupon",
            Resource::Customer => "Customer",
            Resource::CustomerCoupon => "Customer coupon link",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Resource::Coupon => "coupon",
            Resource::Customer => "customer",
            Resource::CustomerCoupon => "customer-coupon link",
        }
    }

    fn unique_hint(self) -> &'static str {
        match self {
            Resource::Coupon => "Code is probably already in use.",
            Resource::Customer => "Username is probably already in use.",
            Resource::CustomerCoupon => "The link already exists.",
        }
    }

    fn reference_hint(self) -> &'static str {
        match self {
            Resource::CustomerCoupon => "Customer or coupon does not exist.",
            _ => "A referenced record does not exist.",
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid bind address {addr}: {source}")]
    BindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_resource_title() {
        let e = JsonApiError::from_service(ServiceError::not_found("coupon", "1"), Resource::Coupon, "update");
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.detail.as_deref(), Some("Coupon not found."));
    }

    #[test]
    fn duplicate_username_is_bad_request() {
        let e = JsonApiError::from_service(
            ServiceError::CommitFailed(CommitError::UniqueViolation("customer.username".into())),
            Resource::Customer,
            "create",
        );
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            e.detail.as_deref(),
            Some("Failed to create customer. Username is probably already in use.")
        );
    }

    #[test]
    fn lost_connection_is_unavailable() {
        let e = JsonApiError::from_service(
            ServiceError::CommitFailed(CommitError::Connection("reset".into())),
            Resource::Coupon,
            "delete",
        );
        assert_eq!(e.status, StatusCode::SERVICE_UNAVAILABLE);
        let e = JsonApiError::from_service(ServiceError::Unavailable("pool".into()), Resource::Coupon, "create");
        assert_eq!(e.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn read_failures_are_internal() {
        let e = JsonApiError::from_service(ServiceError::Db("boom".into()), Resource::Customer, "list");
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.title, "Database Error");
    }
}
