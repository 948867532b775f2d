use crate::entities::{DiscountType, coupon_entity};
use crate::models::nullable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// discount_value is basis points for PERCENTAGE (1000 = 10%), cents for FIXED.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CouponResponse {
    pub id: i64,
    #[schema(example = "WELCOME10")]
    pub code: String,
    pub discount_type: DiscountType,
    #[schema(example = 1000)]
    pub discount_value: i64,
    pub expiration_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub usage_limit: Option<i32>,
    pub times_used: i32,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<coupon_entity::Model> for CouponResponse {
    fn from(m: coupon_entity::Model) -> Self {
        Self {
            id: m.id,
            code: m.code,
            discount_type: m.discount_type,
            discount_value: m.discount_value,
            expiration_date: m.expiration_date,
            is_active: m.is_active,
            usage_limit: m.usage_limit,
            times_used: m.times_used,
            created_by: m.created_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCouponRequest {
    #[schema(example = "WELCOME10")]
    pub code: String,
    pub discount_type: DiscountType,
    #[schema(example = 1000)]
    pub discount_value: i64,
    pub expiration_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub usage_limit: Option<i32>,
}

/// times_used is not writable.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCouponRequest {
    pub code: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<i64>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expiration_date: Option<Option<DateTime<Utc>>>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub usage_limit: Option<Option<i32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidateCouponRequest {
    #[schema(example = "WELCOME10")]
    pub code: String,
    /// Order amount in cents the discount applies to
    #[schema(example = 25000)]
    pub order_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidateCouponResponse {
    pub code: String,
    pub discount_type: DiscountType,
    pub order_amount: i64,
    pub discount_amount: i64,
    pub final_amount: i64,
    pub times_used: i32,
}
