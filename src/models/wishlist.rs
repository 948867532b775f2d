use crate::entities::{wishlist_entity, wishlist_product_entity};
use crate::models::ProductResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A wishlist entry with a snapshot of the product as it is now.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WishlistEntryResponse {
    /// Product id
    pub product: i64,
    pub added_at: DateTime<Utc>,
    pub product_details: ProductResponse,
}

impl WishlistEntryResponse {
    pub fn from_parts(m: wishlist_product_entity::Model, product_details: ProductResponse) -> Self {
        Self {
            product: m.product_id,
            added_at: m.added_at,
            product_details,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WishlistResponse {
    pub id: i64,
    pub user_id: i64,
    pub products: Vec<WishlistEntryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WishlistResponse {
    pub fn from_parts(m: wishlist_entity::Model, products: Vec<WishlistEntryResponse>) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            products,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WishlistAddResponse {
    /// false when the product was already on the wishlist
    pub created: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WishlistRemoveResponse {
    pub removed: bool,
}
