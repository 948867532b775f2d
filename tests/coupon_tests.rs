mod common;

use chrono::{Duration, Utc};
use common::*;
use storefront_backend::AppError;
use storefront_backend::models::*;

fn validate(code: &str, order_amount: i64) -> ValidateCouponRequest {
    ValidateCouponRequest {
        code: code.to_string(),
        order_amount,
    }
}

#[tokio::test]
async fn test_percentage_coupon_discount_and_usage() {
    let ctx = setup().await;
    ctx.coupon("SAVE15", DiscountType::Percentage, 1_500, None).await;

    let result = ctx.coupons.validate_coupon(validate("SAVE15", 999)).await.unwrap();
    assert_eq!(result.discount_amount, 149);
    assert_eq!(result.final_amount, 850);
    assert_eq!(result.times_used, 1);

    let again = ctx.coupons.validate_coupon(validate("SAVE15", 10_000)).await.unwrap();
    assert_eq!(again.discount_amount, 1_500);
    assert_eq!(again.times_used, 2);
}

#[tokio::test]
async fn test_fixed_coupon_never_exceeds_amount() {
    let ctx = setup().await;
    ctx.coupon("TENOFF", DiscountType::Fixed, 1_000, None).await;

    let result = ctx.coupons.validate_coupon(validate("TENOFF", 600)).await.unwrap();
    assert_eq!(result.discount_amount, 600);
    assert_eq!(result.final_amount, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_redemptions_respect_usage_limit() {
    let ctx = setup_concurrent().await;
    let coupon = ctx.coupon("ONCE", DiscountType::Fixed, 500, Some(1)).await;

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let coupons = ctx.coupons.clone();
            tokio::spawn(async move { coupons.validate_coupon(validate("ONCE", 2_000)).await })
        })
        .collect();

    let mut outcomes = Vec::new();
    for task in tasks {
        outcomes.push(task.await.unwrap());
    }

    let successes = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(
        outcomes
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(AppError::CouponUsageLimitReached)))
    );

    let stored = ctx.coupons.get_coupon(coupon.id).await.unwrap();
    assert_eq!(stored.times_used, 1);
}

#[tokio::test]
async fn test_rejections_are_reported_in_order() {
    let ctx = setup().await;

    let err = ctx.coupons.validate_coupon(validate("NOPE", 100)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // expired and inactive: expiry wins
    ctx.coupons
        .create_coupon(
            None,
            CreateCouponRequest {
                code: "OLD".to_string(),
                discount_type: DiscountType::Fixed,
                discount_value: 100,
                expiration_date: Some(Utc::now() - Duration::hours(1)),
                is_active: Some(false),
                usage_limit: None,
            },
        )
        .await
        .unwrap();
    let err = ctx.coupons.validate_coupon(validate("OLD", 100)).await.unwrap_err();
    assert!(matches!(err, AppError::CouponExpired));

    ctx.coupons
        .create_coupon(
            None,
            CreateCouponRequest {
                code: "PAUSED".to_string(),
                discount_type: DiscountType::Fixed,
                discount_value: 100,
                expiration_date: Some(Utc::now() + Duration::days(1)),
                is_active: Some(false),
                usage_limit: Some(5),
            },
        )
        .await
        .unwrap();
    let err = ctx.coupons.validate_coupon(validate("PAUSED", 100)).await.unwrap_err();
    assert!(matches!(err, AppError::CouponInactive));

    let paused = ctx.coupons.list_coupons(&PaginationParams::default()).await.unwrap();
    let paused = paused.items.iter().find(|c| c.code == "PAUSED").unwrap();
    assert_eq!(paused.times_used, 0);
}

#[tokio::test]
async fn test_negative_order_amount_is_invalid() {
    let ctx = setup().await;
    ctx.coupon("SAVE10", DiscountType::Percentage, 1_000, None).await;

    let err = ctx.coupons.validate_coupon(validate("SAVE10", -1)).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_coupon_crud_rules() {
    let ctx = setup().await;
    let coupon = ctx.coupon("LIMITED", DiscountType::Fixed, 300, Some(3)).await;

    let dup = ctx
        .coupons
        .create_coupon(
            None,
            CreateCouponRequest {
                code: "LIMITED".to_string(),
                discount_type: DiscountType::Fixed,
                discount_value: 1,
                expiration_date: None,
                is_active: None,
                usage_limit: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(dup, AppError::DuplicateKey(_)));

    ctx.coupons.validate_coupon(validate("LIMITED", 1_000)).await.unwrap();
    ctx.coupons.validate_coupon(validate("LIMITED", 1_000)).await.unwrap();

    let err = ctx
        .coupons
        .update_coupon(
            None,
            coupon.id,
            UpdateCouponRequest {
                usage_limit: Some(Some(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let unlimited = ctx
        .coupons
        .update_coupon(
            None,
            coupon.id,
            UpdateCouponRequest {
                usage_limit: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unlimited.usage_limit, None);
    assert_eq!(unlimited.times_used, 2);

    let too_much = ctx
        .coupons
        .update_coupon(
            None,
            coupon.id,
            UpdateCouponRequest {
                discount_type: Some(DiscountType::Percentage),
                discount_value: Some(20_000),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(too_much, AppError::ValidationError(_)));

    ctx.coupons.delete_coupon(None, coupon.id).await.unwrap();
    let gone = ctx.coupons.get_coupon(coupon.id).await.unwrap_err();
    assert!(matches!(gone, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_created_by_records_caller() {
    let ctx = setup().await;
    let admin = ctx.register(staff(4)).await;

    let coupon = ctx
        .coupons
        .create_coupon(
            Some(&admin),
            CreateCouponRequest {
                code: "STAFFPICK".to_string(),
                discount_type: DiscountType::Percentage,
                discount_value: 500,
                expiration_date: None,
                is_active: None,
                usage_limit: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(coupon.created_by, Some(admin.id));
    assert!(coupon.is_active);
    assert_eq!(coupon.times_used, 0);
}
