use crate::entities::{DiscountType, coupon_entity as coupons};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::access_policy::{AccessPolicy, Action, Resource};
use crate::utils::{non_negative, required_text};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

const CODE_MAX: usize = 50;
/// 100% in basis points
pub const FULL_PERCENTAGE_BP: i64 = 10_000;

/// Discount in cents for `amount`. Never more than `amount`, never negative.
pub fn compute_discount(discount_type: DiscountType, value: i64, amount: i64) -> i64 {
    if amount <= 0 || value <= 0 {
        return 0;
    }
    let discount = match discount_type {
        DiscountType::Percentage => {
            (amount as i128 * value as i128 / FULL_PERCENTAGE_BP as i128) as i64
        }
        DiscountType::Fixed => value,
    };
    discount.min(amount)
}

fn validate_discount(discount_type: DiscountType, value: i64) -> AppResult<()> {
    non_negative("discount_value", value)?;
    if discount_type == DiscountType::Percentage && value > FULL_PERCENTAGE_BP {
        return Err(AppError::ValidationError(format!(
            "Percentage discount_value is in basis points and may not exceed {FULL_PERCENTAGE_BP}"
        )));
    }
    Ok(())
}

fn validate_usage_limit(limit: Option<i32>, times_used: i32) -> AppResult<()> {
    match limit {
        Some(l) if l < 0 => Err(AppError::ValidationError(
            "usage_limit must not be negative".to_string(),
        )),
        Some(l) if l < times_used => Err(AppError::ValidationError(format!(
            "usage_limit may not be lower than times_used ({times_used})"
        ))),
        _ => Ok(()),
    }
}

/// First failing redemption check for a coupon the conditional update skipped.
fn rejection(coupon: &coupons::Model, now: DateTime<Utc>) -> AppError {
    if coupon.is_expired_at(now) {
        AppError::CouponExpired
    } else if !coupon.is_active {
        AppError::CouponInactive
    } else if coupon.usage_exhausted() {
        AppError::CouponUsageLimitReached
    } else {
        // redeemable again at the re-read: the row changed after the update
        log::warn!("Coupon {} changed while being redeemed", coupon.code);
        AppError::CouponUsageLimitReached
    }
}

#[derive(Clone)]
pub struct CouponService {
    pool: DatabaseConnection,
    policy: AccessPolicy,
}

impl CouponService {
    pub fn new(pool: DatabaseConnection, policy: AccessPolicy) -> Self {
        Self { pool, policy }
    }

    pub async fn list_coupons(
        &self,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<CouponResponse>> {
        let base_query = coupons::Entity::find();
        let total = base_query.clone().count(&self.pool).await?;
        let items = base_query
            .order_by_asc(coupons::Column::Code)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?
            .into_iter()
            .map(CouponResponse::from)
            .collect();
        Ok(PaginatedResponse::new(items, params, total))
    }

    pub async fn get_coupon(&self, id: i64) -> AppResult<CouponResponse> {
        Ok(self.find_coupon(id).await?.into())
    }

    pub async fn create_coupon(
        &self,
        identity: Option<&Identity>,
        request: CreateCouponRequest,
    ) -> AppResult<CouponResponse> {
        self.policy
            .authorize(identity, Resource::Coupon, Action::Create, None)?;

        let code = required_text("code", &request.code, CODE_MAX)?;
        validate_discount(request.discount_type, request.discount_value)?;
        validate_usage_limit(request.usage_limit, 0)?;
        self.ensure_code_free(&code, None).await?;

        let now = Utc::now();
        let model = coupons::ActiveModel {
            code: Set(code),
            discount_type: Set(request.discount_type),
            discount_value: Set(request.discount_value),
            expiration_date: Set(request.expiration_date),
            is_active: Set(request.is_active.unwrap_or(true)),
            usage_limit: Set(request.usage_limit),
            times_used: Set(0),
            created_by: Set(identity.map(|i| i.id)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Coupon {} created", model.code);
        Ok(model.into())
    }

    pub async fn update_coupon(
        &self,
        identity: Option<&Identity>,
        id: i64,
        request: UpdateCouponRequest,
    ) -> AppResult<CouponResponse> {
        self.policy
            .authorize(identity, Resource::Coupon, Action::Update, None)?;
        let existing = self.find_coupon(id).await?;

        let discount_type = request.discount_type.unwrap_or(existing.discount_type);
        let discount_value = request.discount_value.unwrap_or(existing.discount_value);
        validate_discount(discount_type, discount_value)?;

        let times_used = existing.times_used;
        let mut am = existing.into_active_model();
        if let Some(code) = &request.code {
            let code = required_text("code", code, CODE_MAX)?;
            self.ensure_code_free(&code, Some(id)).await?;
            am.code = Set(code);
        }
        am.discount_type = Set(discount_type);
        am.discount_value = Set(discount_value);
        if let Some(expiration_date) = request.expiration_date {
            am.expiration_date = Set(expiration_date);
        }
        if let Some(is_active) = request.is_active {
            am.is_active = Set(is_active);
        }
        if let Some(usage_limit) = request.usage_limit {
            validate_usage_limit(usage_limit, times_used)?;
            am.usage_limit = Set(usage_limit);
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(&self.pool).await?.into())
    }

    pub async fn delete_coupon(&self, identity: Option<&Identity>, id: i64) -> AppResult<()> {
        self.policy
            .authorize(identity, Resource::Coupon, Action::Delete, None)?;
        let result = coupons::Entity::delete_by_id(id).exec(&self.pool).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Coupon not found".to_string()));
        }
        Ok(())
    }

    /// Validates `code` against `order_amount` and redeems it.
    ///
    /// `times_used` is bumped with a single conditional update that only
    /// matches a redeemable row, so concurrent callers can never push it past
    /// `usage_limit`. When nothing matched, the coupon is re-read to report
    /// the first failing check: not found, expired, inactive, limit reached.
    pub async fn validate_coupon(
        &self,
        request: ValidateCouponRequest,
    ) -> AppResult<ValidateCouponResponse> {
        if request.order_amount < 0 {
            return Err(AppError::ValidationError(
                "order_amount must not be negative".to_string(),
            ));
        }
        let code = request.code.trim();
        let now = Utc::now();

        let txn = self.pool.begin().await?;
        let result = coupons::Entity::update_many()
            .col_expr(
                coupons::Column::TimesUsed,
                Expr::col(coupons::Column::TimesUsed).add(1),
            )
            .col_expr(coupons::Column::UpdatedAt, Expr::value(now))
            .filter(coupons::Column::Code.eq(code))
            .filter(coupons::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(coupons::Column::ExpirationDate.is_null())
                    .add(coupons::Column::ExpirationDate.gt(now)),
            )
            .filter(
                Condition::any()
                    .add(coupons::Column::UsageLimit.is_null())
                    .add(Expr::col(coupons::Column::TimesUsed).lt(Expr::col(coupons::Column::UsageLimit))),
            )
            .exec(&txn)
            .await?;

        let coupon = coupons::Entity::find()
            .filter(coupons::Column::Code.eq(code))
            .one(&txn)
            .await?;

        let coupon = match (result.rows_affected, coupon) {
            (_, None) => {
                return Err(AppError::NotFound(format!("Coupon '{code}' not found")));
            }
            (1, Some(coupon)) => coupon,
            (_, Some(coupon)) => {
                let err = rejection(&coupon, now);
                log::warn!("Coupon {} rejected: {}", coupon.code, err);
                return Err(err);
            }
        };
        txn.commit().await?;

        let discount_amount =
            compute_discount(coupon.discount_type, coupon.discount_value, request.order_amount);
        log::info!(
            "Coupon {} redeemed ({} of {:?}): discount {} on {}",
            coupon.code,
            coupon.times_used,
            coupon.usage_limit,
            discount_amount,
            request.order_amount
        );

        Ok(ValidateCouponResponse {
            code: coupon.code,
            discount_type: coupon.discount_type,
            order_amount: request.order_amount,
            discount_amount,
            final_amount: request.order_amount - discount_amount,
            times_used: coupon.times_used,
        })
    }

    async fn find_coupon(&self, id: i64) -> AppResult<coupons::Model> {
        coupons::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))
    }

    async fn ensure_code_free(&self, code: &str, except: Option<i64>) -> AppResult<()> {
        let mut query = coupons::Entity::find().filter(coupons::Column::Code.eq(code));
        if let Some(id) = except {
            query = query.filter(coupons::Column::Id.ne(id));
        }
        if query.one(&self.pool).await?.is_some() {
            return Err(AppError::DuplicateKey(format!(
                "Coupon with code '{code}' already exists"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn coupon() -> coupons::Model {
        let now = Utc::now();
        coupons::Model {
            id: 1,
            code: "SAVE10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 1000,
            expiration_date: None,
            is_active: true,
            usage_limit: None,
            times_used: 0,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_percentage_discount_floors() {
        assert_eq!(compute_discount(DiscountType::Percentage, 1000, 25_000), 2_500);
        // 15% of 999 cents = 149.85
        assert_eq!(compute_discount(DiscountType::Percentage, 1500, 999), 149);
        assert_eq!(compute_discount(DiscountType::Percentage, 10_000, 4_321), 4_321);
    }

    #[test]
    fn test_fixed_discount_clamped_to_amount() {
        assert_eq!(compute_discount(DiscountType::Fixed, 500, 2_000), 500);
        assert_eq!(compute_discount(DiscountType::Fixed, 5_000, 2_000), 2_000);
    }

    #[test]
    fn test_zero_amount_or_value() {
        assert_eq!(compute_discount(DiscountType::Fixed, 500, 0), 0);
        assert_eq!(compute_discount(DiscountType::Percentage, 0, 2_000), 0);
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(DiscountType::Percentage, 10_000).is_ok());
        assert!(validate_discount(DiscountType::Percentage, 10_001).is_err());
        assert!(validate_discount(DiscountType::Fixed, 1_000_000).is_ok());
        assert!(validate_discount(DiscountType::Fixed, -1).is_err());
    }

    #[test]
    fn test_validate_usage_limit() {
        assert!(validate_usage_limit(None, 7).is_ok());
        assert!(validate_usage_limit(Some(7), 7).is_ok());
        assert!(validate_usage_limit(Some(6), 7).is_err());
        assert!(validate_usage_limit(Some(-1), 0).is_err());
    }

    #[test]
    fn test_rejection_order() {
        let now = Utc::now();

        let mut c = coupon();
        c.expiration_date = Some(now - Duration::hours(1));
        c.is_active = false;
        assert!(matches!(rejection(&c, now), AppError::CouponExpired));

        let mut c = coupon();
        c.is_active = false;
        c.usage_limit = Some(1);
        c.times_used = 1;
        assert!(matches!(rejection(&c, now), AppError::CouponInactive));

        let mut c = coupon();
        c.usage_limit = Some(1);
        c.times_used = 1;
        assert!(matches!(rejection(&c, now), AppError::CouponUsageLimitReached));
    }

    #[test]
    fn test_expiration_boundary_is_expired() {
        let now = Utc::now();
        let mut c = coupon();
        c.expiration_date = Some(now);
        assert!(c.is_expired_at(now));
        assert!(matches!(rejection(&c, now), AppError::CouponExpired));
    }
}
