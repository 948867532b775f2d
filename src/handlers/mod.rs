pub mod address;
pub mod category;
pub mod coupon;
pub mod order;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;

pub use address::address_config;
pub use category::category_config;
pub use coupon::coupon_config;
pub use order::order_config;
pub use product::product_config;
pub use review::review_config;
pub use user::user_config;
pub use wishlist::wishlist_config;

use actix_web::web;

/// Every resource, mounted under `/api/v1` by the server.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(user_config)
        .configure(category_config)
        .configure(product_config)
        .configure(address_config)
        .configure(order_config)
        .configure(review_config)
        .configure(coupon_config)
        .configure(wishlist_config);
}
