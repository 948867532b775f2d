use crate::entities::review_entity;
use crate::models::{UserResponse, nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    pub user: UserResponse,
    pub product_id: i64,
    pub product_name: String,
    #[schema(example = 5)]
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ReviewResponse {
    pub fn from_parts(m: review_entity::Model, user: UserResponse, product_name: String) -> Self {
        Self {
            id: m.id,
            user,
            product_id: m.product_id,
            product_name,
            rating: m.rating,
            comment: m.comment,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub product_id: i64,
    #[schema(example = 4)]
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub comment: Option<Option<String>>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ReviewQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub product_id: Option<i64>,
}
