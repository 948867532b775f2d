pub mod addresses;
pub mod categories;
pub mod coupons;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;
pub mod wishlist_products;
pub mod wishlists;

pub use addresses as address_entity;
pub use categories as category_entity;
pub use coupons as coupon_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
pub use products as product_entity;
pub use reviews as review_entity;
pub use users as user_entity;
pub use wishlist_products as wishlist_product_entity;
pub use wishlists as wishlist_entity;

pub use coupons::DiscountType;
pub use orders::OrderStatus;
