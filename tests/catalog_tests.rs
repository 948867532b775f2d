mod common;

use common::*;
use storefront_backend::AppError;
use storefront_backend::config::AccessConfig;
use storefront_backend::models::*;

fn product_request(name: &str, price: i64, stock: i32) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        description: None,
        price,
        stock,
        main_image_url: None,
        variations: None,
        category_id: None,
    }
}

#[tokio::test]
async fn test_price_and_stock_never_negative() {
    let ctx = setup().await;

    let err = ctx
        .catalog
        .create_product(None, product_request("Bear", -1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = ctx
        .catalog
        .create_product(None, product_request("Bear", 100, -1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let bear = ctx.product("Bear", 100, 1).await;
    let err = ctx
        .catalog
        .update_product(
            None,
            bear.id,
            UpdateProductRequest {
                stock: Some(-5),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_product_embeds_category_and_survives_its_deletion() {
    let ctx = setup().await;
    let toys = ctx.category("Toys").await;

    let mut request = product_request("Bear", 4_990, 3);
    request.category_id = Some(toys.id);
    request.main_image_url = Some("https://cdn.example.com/bear.png".to_string());
    let bear = ctx.catalog.create_product(None, request).await.unwrap();
    assert_eq!(bear.category.as_ref().unwrap().name, "Toys");

    let by_category = ctx
        .catalog
        .list_products(&ProductQuery {
            category_id: Some(toys.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_category.items.len(), 1);

    ctx.catalog.delete_category(None, toys.id).await.unwrap();
    let orphan = ctx.catalog.get_product(bear.id).await.unwrap();
    assert!(orphan.category.is_none());
}

#[tokio::test]
async fn test_category_name_is_unique() {
    let ctx = setup().await;
    ctx.category("Toys").await;

    let err = ctx
        .catalog
        .create_category(
            None,
            CategoryRequest {
                name: "Toys".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
}

#[tokio::test]
async fn test_invalid_image_url_and_unknown_category() {
    let ctx = setup().await;

    let mut request = product_request("Bear", 100, 1);
    request.main_image_url = Some("not a url".to_string());
    let err = ctx.catalog.create_product(None, request).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let mut request = product_request("Bear", 100, 1);
    request.category_id = Some(404);
    let err = ctx.catalog.create_product(None, request).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_restricted_catalog_writes_need_staff() {
    let ctx = setup_with(AccessConfig {
        restrict_catalog_writes: true,
    })
    .await;
    let shopper = ctx.register(customer(1)).await;
    let admin = ctx.register(staff(2)).await;

    let err = ctx
        .catalog
        .create_product(Some(&shopper), product_request("Bear", 100, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PermissionDenied));

    let err = ctx
        .catalog
        .create_product(None, product_request("Bear", 100, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));

    let bear = ctx
        .catalog
        .create_product(Some(&admin), product_request("Bear", 100, 1))
        .await
        .unwrap();
    assert!(ctx.catalog.get_product(bear.id).await.is_ok());
}

#[tokio::test]
async fn test_addresses_keep_a_single_default() {
    let ctx = setup().await;
    let owner = ctx.register(customer(1)).await;
    let other = ctx.register(customer(2)).await;

    let home = ctx
        .addresses
        .create_address(Some(&owner), address_request("Home street", true))
        .await
        .unwrap();
    let work = ctx
        .addresses
        .create_address(Some(&owner), address_request("Work street", true))
        .await
        .unwrap();

    let home = ctx.addresses.get_address(Some(&owner), home.id).await.unwrap();
    assert!(!home.is_default);
    assert!(work.is_default);

    let listed = ctx
        .addresses
        .list_addresses(Some(&owner), &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(listed.items.len(), 2);
    assert_eq!(listed.items[0].id, work.id);

    let err = ctx.addresses.get_address(Some(&other), home.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(
        ctx.addresses
            .list_addresses(Some(&other), &PaginationParams::default())
            .await
            .unwrap()
            .items
            .is_empty()
    );
}

#[tokio::test]
async fn test_update_product_patch_semantics() {
    let ctx = setup().await;
    let toys = ctx.category("Toys").await;
    let bear = ctx
        .catalog
        .create_product(
            None,
            CreateProductRequest {
                description: Some("Soft".to_string()),
                category_id: Some(toys.id),
                ..product_request("Plush bear", 4_990, 3)
            },
        )
        .await
        .unwrap();

    let updated = ctx
        .catalog
        .update_product(
            None,
            bear.id,
            UpdateProductRequest {
                price: Some(5_490),
                category_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 5_490);
    assert_eq!(updated.stock, 3);
    assert_eq!(updated.description.as_deref(), Some("Soft"));
    assert!(updated.category.is_none());

    let err = ctx
        .catalog
        .update_product(
            None,
            bear.id,
            UpdateProductRequest {
                stock: Some(-2),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let games = ctx.category("Games").await;
    let err = ctx
        .catalog
        .update_category(
            None,
            games.id,
            CategoryRequest {
                name: "Toys".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateKey(_)));
}

#[tokio::test]
async fn test_update_address_moves_default() {
    let ctx = setup().await;
    let owner = ctx.register(customer(1)).await;
    let other = ctx.register(customer(2)).await;

    let home = ctx
        .addresses
        .create_address(Some(&owner), address_request("Home street", true))
        .await
        .unwrap();
    let work = ctx
        .addresses
        .create_address(Some(&owner), address_request("Work street", false))
        .await
        .unwrap();

    let work = ctx
        .addresses
        .update_address(
            Some(&owner),
            work.id,
            UpdateAddressRequest {
                is_default: Some(true),
                complement: Some(Some("Floor 3".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(work.is_default);
    assert_eq!(work.complement.as_deref(), Some("Floor 3"));
    let home = ctx.addresses.get_address(Some(&owner), home.id).await.unwrap();
    assert!(!home.is_default);

    let err = ctx
        .addresses
        .update_address(
            Some(&owner),
            work.id,
            UpdateAddressRequest {
                zip_code: Some("!!".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = ctx
        .addresses
        .delete_address(Some(&other), work.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    ctx.addresses.delete_address(Some(&owner), work.id).await.unwrap();
}

#[tokio::test]
async fn test_delete_product_cascades_and_refreshes_order_totals() {
    let ctx = setup().await;
    let buyer = ctx.register(customer(1)).await;
    let bear = ctx.product("Plush bear", 100, 10).await;
    let cube = ctx.product("Puzzle cube", 50, 10).await;

    let mut request = order_request(&[(bear.id, 1), (cube.id, 1)]);
    request.shipping_cost = 30;
    let order = ctx.orders.create_order(Some(&buyer), request).await.unwrap();
    assert_eq!(order.total_amount, 180);

    ctx.reviews
        .create_review(
            Some(&buyer),
            CreateReviewRequest {
                product_id: bear.id,
                rating: 5,
                comment: None,
            },
        )
        .await
        .unwrap();
    ctx.wishlists.add_to_wishlist(Some(&buyer), bear.id).await.unwrap();
    ctx.wishlists.add_to_wishlist(Some(&buyer), cube.id).await.unwrap();

    ctx.catalog.delete_product(None, bear.id).await.unwrap();

    let reloaded = ctx.orders.get_order(Some(&buyer), order.id).await.unwrap();
    assert_eq!(reloaded.items.len(), 1);
    assert_eq!(reloaded.items[0].product_id, cube.id);
    assert_eq!(reloaded.total_amount, 50 + 30);

    let reviews = ctx
        .reviews
        .list_reviews(&ReviewQuery {
            product_id: Some(bear.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(reviews.items.is_empty());

    let wishlists = ctx.wishlists.list_wishlists(Some(&buyer)).await.unwrap();
    assert_eq!(wishlists[0].products.len(), 1);
    assert_eq!(wishlists[0].products[0].product, cube.id);

    let err = ctx.catalog.delete_product(None, bear.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
