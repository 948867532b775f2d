use crate::entities::address_entity as addresses;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::access_policy::{AccessPolicy, Action, ListScope, Resource};
use crate::utils::{optional_text, required_text, validate_zip_code};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct AddressService {
    pool: DatabaseConnection,
    policy: AccessPolicy,
}

impl AddressService {
    pub fn new(pool: DatabaseConnection, policy: AccessPolicy) -> Self {
        Self { pool, policy }
    }

    pub async fn list_addresses(
        &self,
        identity: Option<&Identity>,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<AddressResponse>> {
        let mut base_query = addresses::Entity::find();
        if let ListScope::OwnedBy(owner) =
            self.policy.list_scope(identity, Resource::Address, None)?
        {
            base_query = base_query.filter(addresses::Column::UserId.eq(owner));
        }

        let total = base_query.clone().count(&self.pool).await?;
        let items = base_query
            .order_by_desc(addresses::Column::IsDefault)
            .order_by_asc(addresses::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?
            .into_iter()
            .map(AddressResponse::from)
            .collect();

        Ok(PaginatedResponse::new(items, params, total))
    }

    pub async fn get_address(&self, identity: Option<&Identity>, id: i64) -> AppResult<AddressResponse> {
        Ok(self.find_visible(identity, id).await?.into())
    }

    pub async fn create_address(
        &self,
        identity: Option<&Identity>,
        request: CreateAddressRequest,
    ) -> AppResult<AddressResponse> {
        self.policy
            .authorize(identity, Resource::Address, Action::Create, None)?;
        let owner = identity
            .ok_or_else(|| AppError::AuthError("Authentication required".to_string()))?
            .id;

        let zip_code = required_text("zip_code", &request.zip_code, 10)?;
        validate_zip_code(&zip_code)?;

        let txn = self.pool.begin().await?;
        if request.is_default {
            clear_default(&txn, owner, None).await?;
        }
        let model = addresses::ActiveModel {
            user_id: Set(owner),
            street: Set(required_text("street", &request.street, 255)?),
            number: Set(required_text("number", &request.number, 10)?),
            complement: Set(optional_text("complement", request.complement, 100)?),
            neighborhood: Set(required_text("neighborhood", &request.neighborhood, 100)?),
            city: Set(required_text("city", &request.city, 100)?),
            state: Set(required_text("state", &request.state, 100)?),
            zip_code: Set(zip_code),
            is_default: Set(request.is_default),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        Ok(model.into())
    }

    pub async fn update_address(
        &self,
        identity: Option<&Identity>,
        id: i64,
        request: UpdateAddressRequest,
    ) -> AppResult<AddressResponse> {
        let existing = self.find_visible(identity, id).await?;
        self.policy
            .authorize(identity, Resource::Address, Action::Update, Some(existing.user_id))?;

        let owner = existing.user_id;
        let mut am = existing.into_active_model();
        if let Some(street) = &request.street {
            am.street = Set(required_text("street", street, 255)?);
        }
        if let Some(number) = &request.number {
            am.number = Set(required_text("number", number, 10)?);
        }
        if let Some(complement) = request.complement {
            am.complement = Set(optional_text("complement", complement, 100)?);
        }
        if let Some(neighborhood) = &request.neighborhood {
            am.neighborhood = Set(required_text("neighborhood", neighborhood, 100)?);
        }
        if let Some(city) = &request.city {
            am.city = Set(required_text("city", city, 100)?);
        }
        if let Some(state) = &request.state {
            am.state = Set(required_text("state", state, 100)?);
        }
        if let Some(zip_code) = &request.zip_code {
            let zip_code = required_text("zip_code", zip_code, 10)?;
            validate_zip_code(&zip_code)?;
            am.zip_code = Set(zip_code);
        }

        let txn = self.pool.begin().await?;
        if let Some(is_default) = request.is_default {
            if is_default {
                clear_default(&txn, owner, Some(id)).await?;
            }
            am.is_default = Set(is_default);
        }
        let model = am.update(&txn).await?;
        txn.commit().await?;

        Ok(model.into())
    }

    /// Orders shipped to this address keep existing without one.
    pub async fn delete_address(&self, identity: Option<&Identity>, id: i64) -> AppResult<()> {
        let existing = self.find_visible(identity, id).await?;
        self.policy
            .authorize(identity, Resource::Address, Action::Delete, Some(existing.user_id))?;
        addresses::Entity::delete_by_id(existing.id)
            .exec(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_visible(&self, identity: Option<&Identity>, id: i64) -> AppResult<addresses::Model> {
        if identity.is_none() {
            return Err(AppError::AuthError("Authentication required".to_string()));
        }
        match addresses::Entity::find_by_id(id).one(&self.pool).await? {
            Some(address) if self.policy.can_see(identity, Resource::Address, address.user_id) => {
                Ok(address)
            }
            _ => Err(AppError::NotFound("Address not found".to_string())),
        }
    }
}

/// An address usable as `owner`'s shipping address.
pub(crate) async fn find_owned_address<C: ConnectionTrait>(
    db: &C,
    owner: i64,
    id: i64,
) -> AppResult<addresses::Model> {
    addresses::Entity::find_by_id(id)
        .filter(addresses::Column::UserId.eq(owner))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Shipping address not found".to_string()))
}

async fn clear_default<C: ConnectionTrait>(db: &C, owner: i64, except: Option<i64>) -> AppResult<()> {
    let mut update = addresses::Entity::update_many()
        .col_expr(addresses::Column::IsDefault, Expr::value(false))
        .filter(addresses::Column::UserId.eq(owner))
        .filter(addresses::Column::IsDefault.eq(true));
    if let Some(id) = except {
        update = update.filter(addresses::Column::Id.ne(id));
    }
    update.exec(db).await?;
    Ok(())
}
