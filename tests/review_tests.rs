mod common;

use common::*;
use storefront_backend::AppError;
use storefront_backend::models::*;

fn review(product_id: i64, rating: i32) -> CreateReviewRequest {
    CreateReviewRequest {
        product_id,
        rating,
        comment: Some("Lovely".to_string()),
    }
}

#[tokio::test]
async fn test_one_review_per_user_and_product() {
    let ctx = setup().await;
    let author = ctx.register(customer(1)).await;
    let bear = ctx.product("Plush bear", 4_990, 10).await;

    let created = ctx.reviews.create_review(Some(&author), review(bear.id, 5)).await.unwrap();
    assert_eq!(created.user.username, "customer1");
    assert_eq!(created.product_name, "Plush bear");

    let err = ctx
        .reviews
        .create_review(Some(&author), review(bear.id, 4))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
}

#[tokio::test]
async fn test_rating_must_be_one_to_five() {
    let ctx = setup().await;
    let author = ctx.register(customer(1)).await;
    let bear = ctx.product("Plush bear", 4_990, 10).await;

    for rating in [0, 6] {
        let err = ctx
            .reviews
            .create_review(Some(&author), review(bear.id, rating))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    let err = ctx
        .reviews
        .create_review(Some(&author), review(77, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_review_write_is_author_or_staff() {
    let ctx = setup().await;
    let author = ctx.register(customer(1)).await;
    let stranger = ctx.register(customer(2)).await;
    let moderator = ctx.register(staff(3)).await;
    let bear = ctx.product("Plush bear", 4_990, 10).await;

    let created = ctx.reviews.create_review(Some(&author), review(bear.id, 2)).await.unwrap();

    let err = ctx
        .reviews
        .update_review(
            Some(&stranger),
            created.id,
            UpdateReviewRequest {
                rating: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied));

    let updated = ctx
        .reviews
        .update_review(
            Some(&author),
            created.id,
            UpdateReviewRequest {
                rating: Some(3),
                comment: Some(None),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.rating, 3);
    assert_eq!(updated.comment, None);

    let err = ctx.reviews.delete_review(None, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));
    ctx.reviews.delete_review(Some(&moderator), created.id).await.unwrap();
    let err = ctx.reviews.get_review(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_reviews_filter_by_product() {
    let ctx = setup().await;
    let a = ctx.register(customer(1)).await;
    let b = ctx.register(customer(2)).await;
    let bear = ctx.product("Plush bear", 4_990, 10).await;
    let cube = ctx.product("Puzzle cube", 1_500, 10).await;

    ctx.reviews.create_review(Some(&a), review(bear.id, 5)).await.unwrap();
    ctx.reviews.create_review(Some(&b), review(bear.id, 4)).await.unwrap();
    ctx.reviews.create_review(Some(&a), review(cube.id, 1)).await.unwrap();

    let bear_reviews = ctx
        .reviews
        .list_reviews(&ReviewQuery {
            product_id: Some(bear.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(bear_reviews.pagination.total, 2);
    assert!(bear_reviews.items.iter().all(|r| r.product_id == bear.id));

    let all = ctx.reviews.list_reviews(&ReviewQuery::default()).await.unwrap();
    assert_eq!(all.items.len(), 3);
}
