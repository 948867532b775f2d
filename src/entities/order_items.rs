use sea_orm::entity::prelude::*;

/// price_at_purchase is the product price copied at insert time (cents);
/// later product price changes never touch it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub price_at_purchase: i64,
}

impl Model {
    pub fn line_total(&self) -> i64 {
        self.price_at_purchase * self.quantity as i64
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
