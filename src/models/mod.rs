pub mod address;
pub mod catalog;
pub mod common;
pub mod coupon;
pub mod order;
pub mod pagination;
pub mod review;
pub mod user;
pub mod wishlist;

pub use address::*;
pub use catalog::*;
pub use common::*;
pub use coupon::*;
pub use order::*;
pub use pagination::*;
pub use review::*;
pub use user::*;
pub use wishlist::*;

pub use crate::entities::{DiscountType, OrderStatus};
