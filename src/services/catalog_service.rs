use crate::entities::{
    category_entity as categories, order_item_entity as order_items, product_entity as products,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::access_policy::{AccessPolicy, Action, Resource};
use crate::services::order_service::{orders_with_product, refresh_totals};
use crate::utils::{non_negative, optional_text, required_text, validate_url};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

const CATEGORY_NAME_MAX: usize = 100;
const PRODUCT_NAME_MAX: usize = 200;

/// Categories and products.
#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
    policy: AccessPolicy,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection, policy: AccessPolicy) -> Self {
        Self { pool, policy }
    }

    // -----------------------------
    // Categories
    // -----------------------------

    pub async fn list_categories(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<CategoryResponse>> {
        let base_query = categories::Entity::find();
        let total = base_query.clone().count(&self.pool).await?;
        let items = base_query
            .order_by_asc(categories::Column::Name)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?
            .into_iter()
            .map(CategoryResponse::from)
            .collect();
        Ok(PaginatedResponse::new(items, params, total))
    }

    pub async fn get_category(&self, id: i64) -> AppResult<CategoryResponse> {
        Ok(find_category(&self.pool, id).await?.into())
    }

    pub async fn create_category(
        &self,
        identity: Option<&Identity>,
        request: CategoryRequest,
    ) -> AppResult<CategoryResponse> {
        self.policy
            .authorize(identity, Resource::Category, Action::Create, None)?;
        let name = required_text("name", &request.name, CATEGORY_NAME_MAX)?;
        self.ensure_category_name_free(&name, None).await?;

        let model = categories::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(model.into())
    }

    pub async fn update_category(
        &self,
        identity: Option<&Identity>,
        id: i64,
        request: CategoryRequest,
    ) -> AppResult<CategoryResponse> {
        self.policy
            .authorize(identity, Resource::Category, Action::Update, None)?;
        let existing = find_category(&self.pool, id).await?;
        let name = required_text("name", &request.name, CATEGORY_NAME_MAX)?;
        self.ensure_category_name_free(&name, Some(id)).await?;

        let mut am = existing.into_active_model();
        am.name = Set(name);
        Ok(am.update(&self.pool).await?.into())
    }

    /// Products of the category keep existing with no category.
    pub async fn delete_category(&self, identity: Option<&Identity>, id: i64) -> AppResult<()> {
        self.policy
            .authorize(identity, Resource::Category, Action::Delete, None)?;
        let result = categories::Entity::delete_by_id(id).exec(&self.pool).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }
        Ok(())
    }

    async fn ensure_category_name_free(&self, name: &str, except: Option<i64>) -> AppResult<()> {
        let mut query = categories::Entity::find().filter(categories::Column::Name.eq(name));
        if let Some(id) = except {
            query = query.filter(categories::Column::Id.ne(id));
        }
        if query.one(&self.pool).await?.is_some() {
            return Err(AppError::DuplicateKey(format!(
                "Category with name '{name}' already exists"
            )));
        }
        Ok(())
    }

    // -----------------------------
    // Products
    // -----------------------------

    pub async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> AppResult<PaginatedResponse<ProductResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let mut base_query = products::Entity::find();
        if let Some(category_id) = query.category_id {
            base_query = base_query.filter(products::Column::CategoryId.eq(category_id));
        }

        let total = base_query.clone().count(&self.pool).await?;
        let models = base_query
            .order_by_asc(products::Column::Name)
            .order_by_asc(products::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let items = materialize_products(&self.pool, models).await?;
        Ok(PaginatedResponse::new(items, &params, total))
    }

    pub async fn get_product(&self, id: i64) -> AppResult<ProductResponse> {
        let model = find_product(&self.pool, id).await?;
        product_response(&self.pool, model).await
    }

    pub async fn create_product(
        &self,
        identity: Option<&Identity>,
        request: CreateProductRequest,
    ) -> AppResult<ProductResponse> {
        self.policy
            .authorize(identity, Resource::Product, Action::Create, None)?;

        let name = required_text("name", &request.name, PRODUCT_NAME_MAX)?;
        non_negative("price", request.price)?;
        non_negative("stock", request.stock as i64)?;
        let main_image_url = optional_text("main_image_url", request.main_image_url, 200)?;
        if let Some(url) = &main_image_url {
            validate_url("main_image_url", url)?;
        }
        if let Some(category_id) = request.category_id {
            find_category(&self.pool, category_id).await?;
        }

        let now = Utc::now();
        let model = products::ActiveModel {
            name: Set(name),
            description: Set(request.description.filter(|d| !d.trim().is_empty())),
            price: Set(request.price),
            stock: Set(request.stock),
            main_image_url: Set(main_image_url),
            variations: Set(request.variations.filter(|v| !v.trim().is_empty())),
            category_id: Set(request.category_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Product {} created: {}", model.id, model.name);
        product_response(&self.pool, model).await
    }

    pub async fn update_product(
        &self,
        identity: Option<&Identity>,
        id: i64,
        request: UpdateProductRequest,
    ) -> AppResult<ProductResponse> {
        self.policy
            .authorize(identity, Resource::Product, Action::Update, None)?;
        let existing = find_product(&self.pool, id).await?;
        let mut am = existing.into_active_model();

        if let Some(name) = &request.name {
            am.name = Set(required_text("name", name, PRODUCT_NAME_MAX)?);
        }
        if let Some(description) = request.description {
            am.description = Set(description.filter(|d| !d.trim().is_empty()));
        }
        if let Some(price) = request.price {
            non_negative("price", price)?;
            am.price = Set(price);
        }
        if let Some(stock) = request.stock {
            non_negative("stock", stock as i64)?;
            am.stock = Set(stock);
        }
        if let Some(url) = request.main_image_url {
            let url = optional_text("main_image_url", url, 200)?;
            if let Some(u) = &url {
                validate_url("main_image_url", u)?;
            }
            am.main_image_url = Set(url);
        }
        if let Some(variations) = request.variations {
            am.variations = Set(variations.filter(|v| !v.trim().is_empty()));
        }
        if let Some(category_id) = request.category_id {
            if let Some(cid) = category_id {
                find_category(&self.pool, cid).await?;
            }
            am.category_id = Set(category_id);
        }
        am.updated_at = Set(Utc::now());

        let model = am.update(&self.pool).await?;
        product_response(&self.pool, model).await
    }

    /// Cascades to the product's order items, reviews and wishlist entries.
    /// Orders that lose a line get their totals recomputed in the same
    /// transaction.
    pub async fn delete_product(&self, identity: Option<&Identity>, id: i64) -> AppResult<()> {
        self.policy
            .authorize(identity, Resource::Product, Action::Delete, None)?;

        let txn = self.pool.begin().await?;
        let affected_orders = orders_with_product(&txn, id).await?;
        order_items::Entity::delete_many()
            .filter(order_items::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        let result = products::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Product not found".to_string()));
        }
        refresh_totals(&txn, &affected_orders).await?;
        txn.commit().await?;

        log::info!(
            "Product {id} deleted, {} order total(s) recomputed",
            affected_orders.len()
        );
        Ok(())
    }
}

pub(crate) async fn find_category<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> AppResult<categories::Model> {
    categories::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
}

pub(crate) async fn find_product<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> AppResult<products::Model> {
    products::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

async fn product_response<C: ConnectionTrait>(
    db: &C,
    model: products::Model,
) -> AppResult<ProductResponse> {
    let category = match model.category_id {
        Some(cid) => categories::Entity::find_by_id(cid).one(db).await?,
        None => None,
    };
    Ok(ProductResponse::from_model(model, category))
}

/// Builds product DTOs with their categories using one category query.
pub(crate) async fn materialize_products<C: ConnectionTrait>(
    db: &C,
    models: Vec<products::Model>,
) -> AppResult<Vec<ProductResponse>> {
    let category_ids: Vec<i64> = models.iter().filter_map(|p| p.category_id).collect();
    let category_map: HashMap<i64, categories::Model> = if category_ids.is_empty() {
        HashMap::new()
    } else {
        categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect()
    };

    Ok(models
        .into_iter()
        .map(|p| {
            let category = p.category_id.and_then(|cid| category_map.get(&cid).cloned());
            ProductResponse::from_model(p, category)
        })
        .collect())
}
