pub mod access_policy;
pub mod address_service;
pub mod catalog_service;
pub mod coupon_service;
pub mod order_service;
pub mod review_service;
pub mod user_service;
pub mod wishlist_service;

pub use access_policy::AccessPolicy;
pub use address_service::AddressService;
pub use catalog_service::CatalogService;
pub use coupon_service::{CouponService, compute_discount};
pub use order_service::{OrderService, order_total};
pub use review_service::ReviewService;
pub use user_service::UserService;
pub use wishlist_service::WishlistService;
