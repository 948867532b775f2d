mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use common::*;
use serde_json::{Value, json};
use storefront_backend::handlers;
use storefront_backend::middlewares::AuthMiddleware;

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new($ctx.jwt.clone(), $ctx.users.clone()))
                .app_data(web::Data::new($ctx.users.clone()))
                .app_data(web::Data::new($ctx.catalog.clone()))
                .app_data(web::Data::new($ctx.addresses.clone()))
                .app_data(web::Data::new($ctx.orders.clone()))
                .app_data(web::Data::new($ctx.reviews.clone()))
                .app_data(web::Data::new($ctx.coupons.clone()))
                .app_data(web::Data::new($ctx.wishlists.clone()))
                .service(web::scope("/api/v1").configure(handlers::api_config)),
        )
        .await
    };
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_me_requires_token_and_mirrors_identity() {
    let ctx = setup().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/users/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let caller = customer(7);
    let token = ctx.token_for(&caller);
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["username"], json!("customer7"));

    // the middleware created the users row
    let req = test::TestRequest::get().uri("/api/v1/users/7").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_invalid_token_is_rejected() {
    let ctx = setup().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/products")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    let resp = test::try_call_service(&app, req).await;
    let status = match resp {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_catalog_crud_status_codes() {
    let ctx = setup().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(json!({"name": "Plush bear", "price": 4990, "stock": 3}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/products")
        .set_json(json!({"name": "Broken", "price": -1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("VALIDATION_ERROR"));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/products/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/products/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_wishlist_actions_status_codes() {
    let ctx = setup().await;
    let bear = ctx.product("Plush bear", 4_990, 10).await;
    let app = test_app!(ctx);
    let token = ctx.token_for(&customer(1));

    let add = |token: &str| {
        test::TestRequest::post()
            .uri(&format!("/api/v1/products/{}/add_to_wishlist", bear.id))
            .insert_header(bearer(token))
            .to_request()
    };
    let remove = |token: &str| {
        test::TestRequest::post()
            .uri(&format!("/api/v1/products/{}/remove_from_wishlist", bear.id))
            .insert_header(bearer(token))
            .to_request()
    };

    assert_eq!(
        test::call_service(&app, remove(&token)).await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        test::call_service(&app, add(&token)).await.status(),
        StatusCode::CREATED
    );
    assert_eq!(
        test::call_service(&app, add(&token)).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        test::call_service(&app, remove(&token)).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        test::call_service(&app, remove(&token)).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/products/{}/add_to_wishlist", bear.id))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_orders_over_http() {
    let ctx = setup().await;
    let bear = ctx.product("Plush bear", 4_990, 10).await;
    let app = test_app!(ctx);
    let alice = ctx.token_for(&customer(1));
    let bob = ctx.token_for(&customer(2));

    let req = test::TestRequest::get().uri("/api/v1/orders").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/orders")
        .insert_header(bearer(&alice))
        .set_json(json!({
            "items": [{"product_id": bear.id, "quantity": 2}],
            "payment_method": "pix",
            "shipping_cost": 500
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_amount"], json!(2 * 4_990 + 500));
    assert_eq!(body["data"]["status"], json!("PENDING"));
    let order_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/orders/{order_id}"))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/orders?all=true")
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/orders/{order_id}"))
        .insert_header(bearer(&alice))
        .set_json(json!({"status": "SHIPPED"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], json!("SHIPPED"));
}

#[actix_web::test]
async fn test_coupon_validate_endpoint() {
    let ctx = setup().await;
    ctx.coupon(
        "WELCOME10",
        storefront_backend::models::DiscountType::Percentage,
        1_000,
        Some(1),
    )
    .await;
    let app = test_app!(ctx);

    let validate = || {
        test::TestRequest::post()
            .uri("/api/v1/coupons/validate")
            .set_json(json!({"code": "WELCOME10", "order_amount": 25000}))
            .to_request()
    };

    let resp = test::call_service(&app, validate()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["discount_amount"], json!(2_500));
    assert_eq!(body["data"]["final_amount"], json!(22_500));

    let resp = test::call_service(&app, validate()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], json!("COUPON_USAGE_LIMIT_REACHED"));
}

#[actix_web::test]
async fn test_duplicate_review_is_bad_request() {
    let ctx = setup().await;
    let bear = ctx.product("Plush bear", 4_990, 10).await;
    let app = test_app!(ctx);
    let token = ctx.token_for(&customer(3));

    let create = || {
        test::TestRequest::post()
            .uri("/api/v1/reviews")
            .insert_header(bearer(&token))
            .set_json(json!({"product_id": bear.id, "rating": 5}))
            .to_request()
    };

    assert_eq!(
        test::call_service(&app, create()).await.status(),
        StatusCode::CREATED
    );
    let resp = test::call_service(&app, create()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], json!("DUPLICATE_KEY"));
}

#[actix_web::test]
async fn test_order_item_routes() {
    let ctx = setup().await;
    let bear = ctx.product("Plush bear", 4_990, 10).await;
    let cube = ctx.product("Puzzle cube", 1_500, 10).await;
    let app = test_app!(ctx);
    let token = ctx.token_for(&customer(1));

    let req = test::TestRequest::post()
        .uri("/api/v1/orders")
        .insert_header(bearer(&token))
        .set_json(json!({
            "items": [
                {"product_id": bear.id, "quantity": 1},
                {"product_id": cube.id, "quantity": 1}
            ],
            "payment_method": "pix"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let order_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/orders/{order_id}/items"))
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    let bear_item = items
        .iter()
        .find(|i| i["product_id"] == json!(bear.id))
        .unwrap()["id"]
        .as_i64()
        .unwrap();
    let cube_item = items
        .iter()
        .find(|i| i["product_id"] == json!(cube.id))
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/orders/{order_id}/items/{bear_item}"))
        .insert_header(bearer(&token))
        .set_json(json!({"quantity": 2}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total_amount"], json!(2 * 4_990 + 1_500));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/orders/{order_id}/items/{cube_item}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/orders/{order_id}/items/{cube_item}"))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
