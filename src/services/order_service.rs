use crate::entities::{
    OrderStatus, address_entity as addresses, order_entity as orders,
    order_item_entity as order_items, product_entity as products,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::access_policy::{AccessPolicy, Action, ListScope, Resource};
use crate::services::address_service::find_owned_address;
use crate::utils::{ORDER_NUMBER_MAX_LEN, generate_order_number, non_negative, required_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

const PAYMENT_METHOD_MAX: usize = 50;

/// Σ(quantity × unit price) + shipping, in cents. `lines` are
/// `(price_at_purchase, quantity)` pairs.
pub fn order_total<I>(lines: I, shipping_cost: i64) -> AppResult<i64>
where
    I: IntoIterator<Item = (i64, i32)>,
{
    let overflow = || AppError::ValidationError("Order total is too large".to_string());
    lines.into_iter().try_fold(shipping_cost, |acc, (price, quantity)| {
        price
            .checked_mul(quantity as i64)
            .and_then(|line| acc.checked_add(line))
            .ok_or_else(overflow)
    })
}

fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity <= 0 {
        return Err(AppError::ValidationError(
            "quantity must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn check_stock(product: &products::Model, quantity: i32) -> AppResult<()> {
    if !product.has_stock_for(quantity) {
        return Err(AppError::ValidationError(format!(
            "Insufficient stock for product '{}': requested {}, available {}",
            product.name, quantity, product.stock
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
    policy: AccessPolicy,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection, policy: AccessPolicy) -> Self {
        Self { pool, policy }
    }

    /// Creates the order and its items in one transaction. Unit prices are
    /// copied from the products as they are now and the total is computed here.
    pub async fn create_order(
        &self,
        identity: Option<&Identity>,
        request: CreateOrderRequest,
    ) -> AppResult<OrderResponse> {
        self.policy
            .authorize(identity, Resource::Order, Action::Create, None)?;
        let owner = identity
            .ok_or_else(|| AppError::AuthError("Authentication required".to_string()))?
            .id;

        if request.items.is_empty() {
            return Err(AppError::ValidationError(
                "An order needs at least one item".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for item in &request.items {
            validate_quantity(item.quantity)?;
            if !seen.insert(item.product_id) {
                return Err(AppError::DuplicateKey(format!(
                    "Product {} appears more than once in the order",
                    item.product_id
                )));
            }
        }
        non_negative("shipping_cost", request.shipping_cost)?;
        let payment_method =
            required_text("payment_method", &request.payment_method, PAYMENT_METHOD_MAX)?;
        let order_number = match &request.order_number {
            Some(number) => required_text("order_number", number, ORDER_NUMBER_MAX_LEN)?,
            None => generate_order_number(),
        };

        let txn = self.pool.begin().await?;

        if orders::Entity::find()
            .filter(orders::Column::OrderNumber.eq(order_number.as_str()))
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateKey(format!(
                "Order number '{order_number}' already exists"
            )));
        }

        if let Some(address_id) = request.shipping_address_id {
            find_owned_address(&txn, owner, address_id).await?;
        }

        let product_ids: Vec<i64> = request.items.iter().map(|i| i.product_id).collect();
        let product_map: HashMap<i64, products::Model> = products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(&txn)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut lines = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let product = product_map.get(&item.product_id).ok_or_else(|| {
                AppError::NotFound(format!("Product {} not found", item.product_id))
            })?;
            check_stock(product, item.quantity)?;
            lines.push((product.id, product.price, item.quantity));
        }
        let total_amount = order_total(
            lines.iter().map(|&(_, price, qty)| (price, qty)),
            request.shipping_cost,
        )?;

        let now = Utc::now();
        let order = orders::ActiveModel {
            user_id: Set(owner),
            order_number: Set(order_number),
            total_amount: Set(total_amount),
            shipping_cost: Set(request.shipping_cost),
            status: Set(OrderStatus::Pending),
            payment_method: Set(payment_method),
            shipping_address_id: Set(request.shipping_address_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let item_models = lines
            .iter()
            .map(|&(product_id, price, quantity)| order_items::ActiveModel {
                order_id: Set(order.id),
                product_id: Set(product_id),
                quantity: Set(quantity),
                price_at_purchase: Set(price),
                ..Default::default()
            })
            .collect::<Vec<_>>();
        order_items::Entity::insert_many(item_models).exec(&txn).await?;

        txn.commit().await?;

        log::info!(
            "Order {} created for user {}: {} items, total {}",
            order.order_number,
            owner,
            lines.len(),
            total_amount
        );
        self.order_response(order).await
    }

    /// Appends one line to an existing order and recomputes its total.
    pub async fn add_order_item(
        &self,
        identity: Option<&Identity>,
        order_id: i64,
        request: OrderItemRequest,
    ) -> AppResult<OrderResponse> {
        let order = self.find_visible(identity, order_id).await?;
        self.policy
            .authorize(identity, Resource::Order, Action::Update, Some(order.user_id))?;
        validate_quantity(request.quantity)?;

        let txn = self.pool.begin().await?;

        let product = products::Entity::find_by_id(request.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", request.product_id)))?;
        check_stock(&product, request.quantity)?;

        if order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order.id))
            .filter(order_items::Column::ProductId.eq(product.id))
            .one(&txn)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateKey(format!(
                "Product {} is already part of order {}",
                product.id, order.order_number
            )));
        }

        order_items::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(product.id),
            quantity: Set(request.quantity),
            price_at_purchase: Set(product.price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let shipping_cost = order.shipping_cost;
        let order = refresh_total(&txn, order, shipping_cost).await?;
        txn.commit().await?;

        self.order_response(order).await
    }

    pub async fn list_order_items(
        &self,
        identity: Option<&Identity>,
        order_id: i64,
    ) -> AppResult<Vec<OrderItemResponse>> {
        let order = self.find_visible(identity, order_id).await?;
        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order.id))
            .order_by_asc(order_items::Column::Id)
            .all(&self.pool)
            .await?;
        materialize_items(&self.pool, items).await
    }

    pub async fn get_order_item(
        &self,
        identity: Option<&Identity>,
        order_id: i64,
        item_id: i64,
    ) -> AppResult<OrderItemResponse> {
        let order = self.find_visible(identity, order_id).await?;
        let item = find_item(&self.pool, order.id, item_id).await?;
        materialize_items(&self.pool, vec![item])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Order item not found".to_string()))
    }

    /// Changes the quantity of one line. The unit price is left as it was
    /// bought; stock is checked against the new quantity.
    pub async fn update_order_item(
        &self,
        identity: Option<&Identity>,
        order_id: i64,
        item_id: i64,
        request: UpdateOrderItemRequest,
    ) -> AppResult<OrderResponse> {
        let order = self.find_visible(identity, order_id).await?;
        self.policy
            .authorize(identity, Resource::Order, Action::Update, Some(order.user_id))?;
        validate_quantity(request.quantity)?;

        let txn = self.pool.begin().await?;
        let item = find_item(&txn, order.id, item_id).await?;
        let product = products::Entity::find_by_id(item.product_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", item.product_id)))?;
        check_stock(&product, request.quantity)?;

        let mut am = item.into_active_model();
        am.quantity = Set(request.quantity);
        am.update(&txn).await?;

        let shipping_cost = order.shipping_cost;
        let order = refresh_total(&txn, order, shipping_cost).await?;
        txn.commit().await?;

        self.order_response(order).await
    }

    /// Removes one line and recomputes the total. An order may end up with
    /// no items, leaving only the shipping cost.
    pub async fn delete_order_item(
        &self,
        identity: Option<&Identity>,
        order_id: i64,
        item_id: i64,
    ) -> AppResult<()> {
        let order = self.find_visible(identity, order_id).await?;
        self.policy
            .authorize(identity, Resource::Order, Action::Update, Some(order.user_id))?;

        let txn = self.pool.begin().await?;
        let item = find_item(&txn, order.id, item_id).await?;
        order_items::Entity::delete_by_id(item.id).exec(&txn).await?;

        let shipping_cost = order.shipping_cost;
        let order = refresh_total(&txn, order, shipping_cost).await?;
        txn.commit().await?;

        log::info!("Item {} removed from order {}", item_id, order.order_number);
        Ok(())
    }

    pub async fn list_orders(
        &self,
        identity: Option<&Identity>,
        query: &OrderQuery,
    ) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let mut base_query = orders::Entity::find();
        if let ListScope::OwnedBy(owner) =
            self.policy.list_scope(identity, Resource::Order, query.all)?
        {
            base_query = base_query.filter(orders::Column::UserId.eq(owner));
        }
        if let Some(status) = query.status {
            base_query = base_query.filter(orders::Column::Status.eq(status));
        }

        let total = base_query.clone().count(&self.pool).await?;
        let models = base_query
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let items = materialize_orders(&self.pool, models).await?;
        Ok(PaginatedResponse::new(items, &params, total))
    }

    pub async fn get_order(&self, identity: Option<&Identity>, id: i64) -> AppResult<OrderResponse> {
        let order = self.find_visible(identity, id).await?;
        self.order_response(order).await
    }

    /// Status changes are not constrained; any status may follow any other.
    pub async fn update_order(
        &self,
        identity: Option<&Identity>,
        id: i64,
        request: UpdateOrderRequest,
    ) -> AppResult<OrderResponse> {
        let existing = self.find_visible(identity, id).await?;
        self.policy
            .authorize(identity, Resource::Order, Action::Update, Some(existing.user_id))?;

        let owner = existing.user_id;
        let previous_status = existing.status;
        let shipping_cost = match request.shipping_cost {
            Some(cost) => {
                non_negative("shipping_cost", cost)?;
                Some(cost)
            }
            None => None,
        };

        let txn = self.pool.begin().await?;
        let mut am = existing.clone().into_active_model();
        if let Some(status) = request.status {
            am.status = Set(status);
        }
        if let Some(method) = &request.payment_method {
            am.payment_method = Set(required_text("payment_method", method, PAYMENT_METHOD_MAX)?);
        }
        if let Some(address_id) = request.shipping_address_id {
            if let Some(aid) = address_id {
                find_owned_address(&txn, owner, aid).await?;
            }
            am.shipping_address_id = Set(address_id);
        }
        am.updated_at = Set(Utc::now());
        let mut order = am.update(&txn).await?;

        if let Some(cost) = shipping_cost
            && cost != existing.shipping_cost
        {
            order = refresh_total(&txn, order, cost).await?;
        }
        txn.commit().await?;

        if order.status != previous_status {
            log::info!(
                "Order {} status changed: {} -> {}",
                order.order_number,
                previous_status,
                order.status
            );
        }
        self.order_response(order).await
    }

    pub async fn delete_order(&self, identity: Option<&Identity>, id: i64) -> AppResult<()> {
        let order = self.find_visible(identity, id).await?;
        self.policy
            .authorize(identity, Resource::Order, Action::Delete, Some(order.user_id))?;

        let txn = self.pool.begin().await?;
        order_items::Entity::delete_many()
            .filter(order_items::Column::OrderId.eq(order.id))
            .exec(&txn)
            .await?;
        orders::Entity::delete_by_id(order.id).exec(&txn).await?;
        txn.commit().await?;

        log::info!("Order {} deleted", order.order_number);
        Ok(())
    }

    async fn find_visible(&self, identity: Option<&Identity>, id: i64) -> AppResult<orders::Model> {
        if identity.is_none() {
            return Err(AppError::AuthError("Authentication required".to_string()));
        }
        match orders::Entity::find_by_id(id).one(&self.pool).await? {
            Some(order) if self.policy.can_see(identity, Resource::Order, order.user_id) => Ok(order),
            _ => Err(AppError::NotFound("Order not found".to_string())),
        }
    }

    async fn order_response(&self, order: orders::Model) -> AppResult<OrderResponse> {
        materialize_orders(&self.pool, vec![order])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("Order vanished while loading".to_string()))
    }
}

async fn find_item<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
    item_id: i64,
) -> AppResult<order_items::Model> {
    order_items::Entity::find_by_id(item_id)
        .filter(order_items::Column::OrderId.eq(order_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order item not found".to_string()))
}

async fn materialize_items<C: ConnectionTrait>(
    db: &C,
    items: Vec<order_items::Model>,
) -> AppResult<Vec<OrderItemResponse>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let product_ids: Vec<i64> = items.iter().map(|i| i.product_id).collect();
    let product_map: HashMap<i64, products::Model> = products::Entity::find()
        .filter(products::Column::Id.is_in(product_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    Ok(items
        .into_iter()
        .filter_map(|item| {
            let product = product_map.get(&item.product_id)?;
            Some(OrderItemResponse::from_model(item, product))
        })
        .collect())
}

/// Ids of the orders holding a line for `product_id`.
pub(crate) async fn orders_with_product<C: ConnectionTrait>(
    db: &C,
    product_id: i64,
) -> AppResult<Vec<i64>> {
    Ok(order_items::Entity::find()
        .select_only()
        .column(order_items::Column::OrderId)
        .filter(order_items::Column::ProductId.eq(product_id))
        .distinct()
        .into_tuple::<i64>()
        .all(db)
        .await?)
}

/// Recomputes `total_amount` of each order in `order_ids` from its stored
/// items and current `shipping_cost`.
pub(crate) async fn refresh_totals<C: ConnectionTrait>(db: &C, order_ids: &[i64]) -> AppResult<()> {
    if order_ids.is_empty() {
        return Ok(());
    }
    let affected = orders::Entity::find()
        .filter(orders::Column::Id.is_in(order_ids.to_vec()))
        .all(db)
        .await?;
    for order in affected {
        let shipping_cost = order.shipping_cost;
        refresh_total(db, order, shipping_cost).await?;
    }
    Ok(())
}

/// Recomputes `total_amount` from the stored items and `shipping_cost`.
async fn refresh_total<C: ConnectionTrait>(
    db: &C,
    order: orders::Model,
    shipping_cost: i64,
) -> AppResult<orders::Model> {
    let items = order_items::Entity::find()
        .filter(order_items::Column::OrderId.eq(order.id))
        .all(db)
        .await?;
    let total_amount = order_total(
        items.iter().map(|i| (i.price_at_purchase, i.quantity)),
        shipping_cost,
    )?;

    let mut am = order.into_active_model();
    am.shipping_cost = Set(shipping_cost);
    am.total_amount = Set(total_amount);
    am.updated_at = Set(Utc::now());
    Ok(am.update(db).await?)
}

/// Loads items, their products and shipping addresses for a page of orders
/// with one query each, preserving the input order.
async fn materialize_orders<C: ConnectionTrait>(
    db: &C,
    models: Vec<orders::Model>,
) -> AppResult<Vec<OrderResponse>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<i64> = models.iter().map(|o| o.id).collect();
    let items = order_items::Entity::find()
        .filter(order_items::Column::OrderId.is_in(order_ids))
        .order_by_asc(order_items::Column::Id)
        .all(db)
        .await?;

    let product_ids: Vec<i64> = items
        .iter()
        .map(|i| i.product_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let product_map: HashMap<i64, products::Model> = if product_ids.is_empty() {
        HashMap::new()
    } else {
        products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect()
    };

    let address_ids: Vec<i64> = models.iter().filter_map(|o| o.shipping_address_id).collect();
    let address_map: HashMap<i64, addresses::Model> = if address_ids.is_empty() {
        HashMap::new()
    } else {
        addresses::Entity::find()
            .filter(addresses::Column::Id.is_in(address_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };

    let mut items_by_order: HashMap<i64, Vec<OrderItemResponse>> = HashMap::new();
    for item in items {
        // product rows cascade-delete their items, so a miss means a concurrent delete
        let Some(product) = product_map.get(&item.product_id) else {
            continue;
        };
        items_by_order
            .entry(item.order_id)
            .or_default()
            .push(OrderItemResponse::from_model(item, product));
    }

    Ok(models
        .into_iter()
        .map(|order| {
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            let address = order
                .shipping_address_id
                .and_then(|aid| address_map.get(&aid).cloned())
                .map(AddressResponse::from);
            OrderResponse::from_parts(order, items, address)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_total_sums_lines_and_shipping() {
        let total = order_total([(1000, 2), (250, 3)], 500).unwrap();
        assert_eq!(total, 2000 + 750 + 500);
    }

    #[test]
    fn test_order_total_shipping_only() {
        assert_eq!(order_total(Vec::<(i64, i32)>::new(), 1500).unwrap(), 1500);
    }

    #[test]
    fn test_order_total_overflow() {
        let result = order_total([(i64::MAX, 2)], 0);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }
}
