use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::{Identity, PaginatedResponse, PaginationParams, UserResponse};
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Mirrors the token identity into `users` so owned rows can reference it.
    /// Writes only when the row is missing or the claims changed.
    pub async fn sync_identity(&self, identity: &Identity) -> AppResult<()> {
        if let Some(existing) = users::Entity::find_by_id(identity.id).one(&self.pool).await?
            && existing.username == identity.username
            && existing.email == identity.email
            && existing.is_staff == identity.is_staff
        {
            return Ok(());
        }
        upsert_identity(&self.pool, identity).await
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<UserResponse> {
        users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn list_users(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<UserResponse>> {
        let base_query = users::Entity::find();
        let total = base_query.clone().count(&self.pool).await?;

        let items = base_query
            .order_by_asc(users::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?
            .into_iter()
            .map(UserResponse::from)
            .collect();

        Ok(PaginatedResponse::new(items, params, total))
    }
}

/// Insert-or-refresh of a user row keyed by the provider id.
pub async fn upsert_identity<C: ConnectionTrait>(db: &C, identity: &Identity) -> AppResult<()> {
    let now = Utc::now();
    users::Entity::insert(users::ActiveModel {
        id: Set(identity.id),
        username: Set(identity.username.clone()),
        email: Set(identity.email.clone()),
        is_staff: Set(identity.is_staff),
        created_at: Set(now),
        updated_at: Set(now),
    })
    .on_conflict(
        OnConflict::column(users::Column::Id)
            .update_columns([
                users::Column::Username,
                users::Column::Email,
                users::Column::IsStaff,
                users::Column::UpdatedAt,
            ])
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;
    Ok(())
}
