use crate::entities::{product_entity as products, review_entity as reviews, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::access_policy::{AccessPolicy, Action, Resource};
use crate::services::catalog_service::find_product;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

fn validate_rating(rating: i32) -> AppResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::ValidationError(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ReviewService {
    pool: DatabaseConnection,
    policy: AccessPolicy,
}

impl ReviewService {
    pub fn new(pool: DatabaseConnection, policy: AccessPolicy) -> Self {
        Self { pool, policy }
    }

    pub async fn list_reviews(
        &self,
        query: &ReviewQuery,
    ) -> AppResult<PaginatedResponse<ReviewResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let mut base_query = reviews::Entity::find();
        if let Some(product_id) = query.product_id {
            base_query = base_query.filter(reviews::Column::ProductId.eq(product_id));
        }

        let total = base_query.clone().count(&self.pool).await?;
        let models = base_query
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let items = materialize_reviews(&self.pool, models).await?;
        Ok(PaginatedResponse::new(items, &params, total))
    }

    pub async fn get_review(&self, id: i64) -> AppResult<ReviewResponse> {
        let review = self.find_review(id).await?;
        self.review_response(review).await
    }

    /// One review per user and product.
    pub async fn create_review(
        &self,
        identity: Option<&Identity>,
        request: CreateReviewRequest,
    ) -> AppResult<ReviewResponse> {
        self.policy
            .authorize(identity, Resource::Review, Action::Create, None)?;
        let author = identity
            .ok_or_else(|| AppError::AuthError("Authentication required".to_string()))?
            .id;

        validate_rating(request.rating)?;
        find_product(&self.pool, request.product_id).await?;

        if reviews::Entity::find()
            .filter(reviews::Column::UserId.eq(author))
            .filter(reviews::Column::ProductId.eq(request.product_id))
            .one(&self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateKey(
                "You have already reviewed this product".to_string(),
            ));
        }

        let model = reviews::ActiveModel {
            user_id: Set(author),
            product_id: Set(request.product_id),
            rating: Set(request.rating),
            comment: Set(request.comment.filter(|c| !c.trim().is_empty())),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        self.review_response(model).await
    }

    pub async fn update_review(
        &self,
        identity: Option<&Identity>,
        id: i64,
        request: UpdateReviewRequest,
    ) -> AppResult<ReviewResponse> {
        let existing = self.find_review(id).await?;
        self.policy
            .authorize(identity, Resource::Review, Action::Update, Some(existing.user_id))?;

        let mut am = existing.into_active_model();
        if let Some(rating) = request.rating {
            validate_rating(rating)?;
            am.rating = Set(rating);
        }
        if let Some(comment) = request.comment {
            am.comment = Set(comment.filter(|c| !c.trim().is_empty()));
        }
        let model = am.update(&self.pool).await?;
        self.review_response(model).await
    }

    pub async fn delete_review(&self, identity: Option<&Identity>, id: i64) -> AppResult<()> {
        let existing = self.find_review(id).await?;
        self.policy
            .authorize(identity, Resource::Review, Action::Delete, Some(existing.user_id))?;
        reviews::Entity::delete_by_id(existing.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_review(&self, id: i64) -> AppResult<reviews::Model> {
        reviews::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }

    async fn review_response(&self, review: reviews::Model) -> AppResult<ReviewResponse> {
        materialize_reviews(&self.pool, vec![review])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("Review author or product missing".to_string()))
    }
}

async fn materialize_reviews<C: ConnectionTrait>(
    db: &C,
    models: Vec<reviews::Model>,
) -> AppResult<Vec<ReviewResponse>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids: Vec<i64> = models.iter().map(|r| r.user_id).collect();
    let user_map: HashMap<i64, users::Model> = users::Entity::find()
        .filter(users::Column::Id.is_in(user_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let product_ids: Vec<i64> = models.iter().map(|r| r.product_id).collect();
    let product_names: HashMap<i64, String> = products::Entity::find()
        .filter(products::Column::Id.is_in(product_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    Ok(models
        .into_iter()
        .filter_map(|review| {
            let user = user_map.get(&review.user_id)?.clone();
            let product_name = product_names.get(&review.product_id)?.clone();
            Some(ReviewResponse::from_parts(review, user.into(), product_name))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating_bounds() {
        for ok in 1..=5 {
            assert!(validate_rating(ok).is_ok());
        }
        assert!(matches!(validate_rating(0), Err(AppError::ValidationError(_))));
        assert!(matches!(validate_rating(6), Err(AppError::ValidationError(_))));
    }
}
