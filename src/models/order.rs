use crate::entities::{OrderStatus, order_entity, order_item_entity, product_entity};
use crate::models::{AddressResponse, nullable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One order line. `product_price` is the product's current price,
/// `price_at_purchase` the price frozen when the line was created.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_price: i64,
    pub quantity: i32,
    pub price_at_purchase: i64,
}

impl OrderItemResponse {
    pub fn from_model(m: order_item_entity::Model, product: &product_entity::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            product_id: m.product_id,
            product_name: product.name.clone(),
            product_price: product.price,
            quantity: m.quantity,
            price_at_purchase: m.price_at_purchase,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub user_id: i64,
    #[schema(example = "ORD-20261018-0001")]
    pub order_number: String,
    pub total_amount: i64,
    pub shipping_cost: i64,
    pub status: OrderStatus,
    #[schema(example = "pix")]
    pub payment_method: String,
    pub shipping_address: Option<AddressResponse>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderResponse {
    pub fn from_parts(
        m: order_entity::Model,
        items: Vec<OrderItemResponse>,
        shipping_address: Option<AddressResponse>,
    ) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            order_number: m.order_number,
            total_amount: m.total_amount,
            shipping_cost: m.shipping_cost,
            status: m.status,
            payment_method: m.payment_method,
            shipping_address,
            items,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub product_id: i64,
    #[schema(example = 2)]
    pub quantity: i32,
}

/// Only the quantity of a line can change; its unit price stays frozen.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderItemRequest {
    #[schema(example = 3)]
    pub quantity: i32,
}

/// `order_number` is generated when omitted. Totals are always computed
/// from the items, never taken from the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub order_number: Option<String>,
    pub items: Vec<OrderItemRequest>,
    pub shipping_address_id: Option<i64>,
    #[schema(example = "credit_card")]
    pub payment_method: String,
    #[serde(default)]
    #[schema(example = 1500)]
    pub shipping_cost: i64,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub status: Option<OrderStatus>,
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i64>)]
    pub shipping_address_id: Option<Option<i64>>,
    pub shipping_cost: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct OrderQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<OrderStatus>,
    /// true asks for every owner's orders (staff only); false restricts a
    /// staff caller to their own. Default: staff see all, others their own.
    pub all: Option<bool>,
}
