use crate::entities::{
    product_entity as products, wishlist_entity as wishlists,
    wishlist_product_entity as wishlist_products,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::access_policy::{AccessPolicy, Action, ListScope, Resource};
use crate::services::catalog_service::{find_product, materialize_products};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use std::collections::HashMap;

/// Inserts the caller's wishlist unless it exists. Returns whether a row was
/// created. Backed by the unique index on `wishlists.user_id`, so concurrent
/// callers end up sharing one row.
async fn insert_wishlist_if_absent<C: ConnectionTrait>(db: &C, owner: i64) -> AppResult<bool> {
    let now = Utc::now();
    let rows = wishlists::Entity::insert(wishlists::ActiveModel {
        user_id: Set(owner),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::column(wishlists::Column::UserId)
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;
    Ok(rows == 1)
}

async fn find_wishlist_of<C: ConnectionTrait>(
    db: &C,
    owner: i64,
) -> AppResult<Option<wishlists::Model>> {
    Ok(wishlists::Entity::find()
        .filter(wishlists::Column::UserId.eq(owner))
        .one(db)
        .await?)
}

fn require(identity: Option<&Identity>) -> AppResult<&Identity> {
    identity.ok_or_else(|| AppError::AuthError("Authentication required".to_string()))
}

#[derive(Clone)]
pub struct WishlistService {
    pool: DatabaseConnection,
    policy: AccessPolicy,
}

impl WishlistService {
    pub fn new(pool: DatabaseConnection, policy: AccessPolicy) -> Self {
        Self { pool, policy }
    }

    /// Adds `product_id` to the caller's wishlist, creating the wishlist on
    /// first use. `created` is false when the product was already there.
    pub async fn add_to_wishlist(
        &self,
        identity: Option<&Identity>,
        product_id: i64,
    ) -> AppResult<WishlistAddResponse> {
        let caller = require(identity)?;

        // write first so the transaction holds the write lock before reading;
        // an unknown product rolls the wishlist insert back
        let txn = self.pool.begin().await?;
        insert_wishlist_if_absent(&txn, caller.id).await?;
        find_product(&txn, product_id).await?;
        let wishlist = find_wishlist_of(&txn, caller.id)
            .await?
            .ok_or_else(|| AppError::InternalError("Wishlist missing after upsert".to_string()))?;

        let rows = wishlist_products::Entity::insert(wishlist_products::ActiveModel {
            wishlist_id: Set(wishlist.id),
            product_id: Set(product_id),
            added_at: Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                wishlist_products::Column::WishlistId,
                wishlist_products::Column::ProductId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            // product deleted since the lookup
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::NotFound(format!("Product {product_id} not found"))
            }
            _ => AppError::from(e),
        })?;
        txn.commit().await?;

        Ok(WishlistAddResponse { created: rows == 1 })
    }

    /// Never creates a wishlist. Missing wishlist or entry is NotFound.
    pub async fn remove_from_wishlist(
        &self,
        identity: Option<&Identity>,
        product_id: i64,
    ) -> AppResult<WishlistRemoveResponse> {
        let caller = require(identity)?;
        let wishlist = find_wishlist_of(&self.pool, caller.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Wishlist not found".to_string()))?;

        let result = wishlist_products::Entity::delete_many()
            .filter(wishlist_products::Column::WishlistId.eq(wishlist.id))
            .filter(wishlist_products::Column::ProductId.eq(product_id))
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(
                "Product is not on the wishlist".to_string(),
            ));
        }
        Ok(WishlistRemoveResponse { removed: true })
    }

    pub async fn list_wishlists(&self, identity: Option<&Identity>) -> AppResult<Vec<WishlistResponse>> {
        let mut query = wishlists::Entity::find();
        if let ListScope::OwnedBy(owner) =
            self.policy.list_scope(identity, Resource::Wishlist, None)?
        {
            query = query.filter(wishlists::Column::UserId.eq(owner));
        }
        let models = query
            .order_by_asc(wishlists::Column::Id)
            .all(&self.pool)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for wishlist in models {
            out.push(self.wishlist_response(wishlist).await?);
        }
        Ok(out)
    }

    pub async fn get_wishlist(&self, identity: Option<&Identity>, id: i64) -> AppResult<WishlistResponse> {
        let wishlist = self.find_visible(identity, id).await?;
        self.wishlist_response(wishlist).await
    }

    /// Explicit creation; a caller owns at most one wishlist.
    pub async fn create_wishlist(&self, identity: Option<&Identity>) -> AppResult<WishlistResponse> {
        self.policy
            .authorize(identity, Resource::Wishlist, Action::Create, None)?;
        let caller = require(identity)?;

        if !insert_wishlist_if_absent(&self.pool, caller.id).await? {
            return Err(AppError::DuplicateKey(
                "A wishlist already exists for this user".to_string(),
            ));
        }
        let wishlist = find_wishlist_of(&self.pool, caller.id)
            .await?
            .ok_or_else(|| AppError::InternalError("Wishlist missing after insert".to_string()))?;
        self.wishlist_response(wishlist).await
    }

    /// Wishlist entries change only through add/remove; an update just
    /// refreshes `updated_at`.
    pub async fn update_wishlist(&self, identity: Option<&Identity>, id: i64) -> AppResult<WishlistResponse> {
        let wishlist = self.find_visible(identity, id).await?;
        self.policy
            .authorize(identity, Resource::Wishlist, Action::Update, Some(wishlist.user_id))?;

        let mut am = wishlist.into_active_model();
        am.updated_at = Set(Utc::now());
        let wishlist = am.update(&self.pool).await?;
        self.wishlist_response(wishlist).await
    }

    pub async fn delete_wishlist(&self, identity: Option<&Identity>, id: i64) -> AppResult<()> {
        let wishlist = self.find_visible(identity, id).await?;
        self.policy
            .authorize(identity, Resource::Wishlist, Action::Delete, Some(wishlist.user_id))?;

        let txn = self.pool.begin().await?;
        wishlist_products::Entity::delete_many()
            .filter(wishlist_products::Column::WishlistId.eq(wishlist.id))
            .exec(&txn)
            .await?;
        wishlists::Entity::delete_by_id(wishlist.id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn find_visible(&self, identity: Option<&Identity>, id: i64) -> AppResult<wishlists::Model> {
        require(identity)?;
        match wishlists::Entity::find_by_id(id).one(&self.pool).await? {
            Some(w) if self.policy.can_see(identity, Resource::Wishlist, w.user_id) => Ok(w),
            _ => Err(AppError::NotFound("Wishlist not found".to_string())),
        }
    }

    /// Entries oldest first, each with the product as it is now.
    async fn wishlist_response(&self, wishlist: wishlists::Model) -> AppResult<WishlistResponse> {
        let entries = wishlist_products::Entity::find()
            .filter(wishlist_products::Column::WishlistId.eq(wishlist.id))
            .order_by_asc(wishlist_products::Column::AddedAt)
            .order_by_asc(wishlist_products::Column::Id)
            .all(&self.pool)
            .await?;

        let product_ids: Vec<i64> = entries.iter().map(|e| e.product_id).collect();
        let product_models = if product_ids.is_empty() {
            Vec::new()
        } else {
            products::Entity::find()
                .filter(products::Column::Id.is_in(product_ids))
                .all(&self.pool)
                .await?
        };
        let product_map: HashMap<i64, ProductResponse> =
            materialize_products(&self.pool, product_models)
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect();

        let products = entries
            .into_iter()
            .filter_map(|entry| {
                let details = product_map.get(&entry.product_id)?.clone();
                Some(WishlistEntryResponse::from_parts(entry, details))
            })
            .collect();

        Ok(WishlistResponse::from_parts(wishlist, products))
    }
}
