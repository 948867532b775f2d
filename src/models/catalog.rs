use crate::entities::{category_entity, product_entity};
use crate::models::nullable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    #[schema(example = "Toys")]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryRequest {
    #[schema(example = "Toys")]
    pub name: String,
}

impl From<category_entity::Model> for CategoryResponse {
    fn from(m: category_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

/// Product with its category embedded. Prices are cents.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 4990)]
    pub price: i64,
    pub stock: i32,
    pub main_image_url: Option<String>,
    pub variations: Option<String>,
    pub category: Option<CategoryResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductResponse {
    pub fn from_model(m: product_entity::Model, category: Option<category_entity::Model>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            price: m.price,
            stock: m.stock,
            main_image_url: m.main_image_url,
            variations: m.variations,
            category: category.map(CategoryResponse::from),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Plush bear")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 4990)]
    pub price: i64,
    #[serde(default)]
    pub stock: i32,
    #[schema(example = "https://cdn.example.com/bear.png")]
    pub main_image_url: Option<String>,
    #[schema(example = "Size: S, M, L | Color: Blue, Pink")]
    pub variations: Option<String>,
    pub category_id: Option<i64>,
}

/// Absent fields are left untouched; nullable fields accept `null` to clear.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub main_image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub variations: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<Option<i64>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category_id: Option<i64>,
}
