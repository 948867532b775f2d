use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Catalog product
/// - price: cents, never negative
/// - stock: units on hand, never negative
/// - variations: free text such as "Size: S, M, L | Color: Blue"
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub main_image_url: Option<String>,
    pub variations: Option<String>,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// Whether `quantity` units can be sold from current stock.
    pub fn has_stock_for(&self, quantity: i32) -> bool {
        quantity > 0 && self.stock >= quantity
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
