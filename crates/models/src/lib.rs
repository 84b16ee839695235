pub mod coupon;
pub mod customer;
pub mod customer_coupon;
pub mod db;
pub mod errors;
pub mod timestamp;

pub use coupon::{CouponCreate, CouponStatus, CouponUpdate, DiscountType};
pub use customer::{CustomerCreate, CustomerUpdate};
pub use customer_coupon::{CustomerCouponCreate, CustomerCouponKey, CustomerCouponUpdate};
pub use timestamp::UtcDateTime;

#[cfg(test)]
mod tests;
