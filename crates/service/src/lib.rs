//! Service layer providing CRUD operations on top of models.
//! - `crud::Service` is entity-agnostic; entity services are aliases of it.
//! - Every write is one transaction.
//! - Store failures are narrowed into `errors::CommitError`.

pub mod errors;
pub mod key;
pub mod crud;
pub mod coupon_service;
pub mod customer_service;
pub mod customer_coupon_service;
pub mod fixtures;
#[cfg(test)]
pub mod test_support;

pub use coupon_service::CouponService;
pub use crud::{EntityKey, Patch, Service};
pub use customer_coupon_service::CustomerCouponService;
pub use customer_service::CustomerService;
pub use errors::{CommitError, KeyFormatError, ServiceError};
pub use key::{KeyPart, PrimaryKey};
