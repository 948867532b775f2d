use crate::middlewares::CurrentUser;
use crate::models::*;
use crate::services::OrderService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
        ("status" = Option<OrderStatus>, Query, description = "Only orders with this status"),
        ("all" = Option<bool>, Query, description = "Staff only: every customer's orders")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Orders, newest first", body = PaginatedOrderResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "all=true requested by a non-staff caller")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    user: CurrentUser,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse> {
    match order_service.list_orders(Some(&user.0), &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i64, Path, description = "Order id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Order with items and shipping address", body = OrderResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    order_service: web::Data<OrderService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service.get_order(Some(&user.0), path.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    request_body = CreateOrderRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid order, insufficient stock or duplicate"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product or shipping address not found")
    )
)]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    user: CurrentUser,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    match order_service
        .create_order(Some(&user.0), request.into_inner())
        .await
    {
        Ok(order) => Ok(HttpResponse::Created().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders/{id}/items",
    tag = "order",
    params(("id" = i64, Path, description = "Order id")),
    request_body = OrderItemRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Item added, total recomputed", body = OrderResponse),
        (status = 400, description = "Invalid quantity, insufficient stock or product already in the order"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order or product not found")
    )
)]
pub async fn add_order_item(
    order_service: web::Data<OrderService>,
    user: CurrentUser,
    path: web::Path<i64>,
    request: web::Json<OrderItemRequest>,
) -> Result<HttpResponse> {
    match order_service
        .add_order_item(Some(&user.0), path.into_inner(), request.into_inner())
        .await
    {
        Ok(order) => Ok(HttpResponse::Created().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/{id}/items",
    tag = "order",
    params(("id" = i64, Path, description = "Order id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Lines of the order", body = [OrderItemResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn list_order_items(
    order_service: web::Data<OrderService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service
        .list_order_items(Some(&user.0), path.into_inner())
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/{id}/items/{item_id}",
    tag = "order",
    params(
        ("id" = i64, Path, description = "Order id"),
        ("item_id" = i64, Path, description = "Order item id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Order line", body = OrderItemResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order or item not found")
    )
)]
pub async fn get_order_item(
    order_service: web::Data<OrderService>,
    user: CurrentUser,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (order_id, item_id) = path.into_inner();
    match order_service
        .get_order_item(Some(&user.0), order_id, item_id)
        .await
    {
        Ok(item) => Ok(HttpResponse::Ok().json(ApiResponse::success(item))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/orders/{id}/items/{item_id}",
    tag = "order",
    params(
        ("id" = i64, Path, description = "Order id"),
        ("item_id" = i64, Path, description = "Order item id")
    ),
    request_body = UpdateOrderItemRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Quantity changed, total recomputed", body = OrderResponse),
        (status = 400, description = "Invalid quantity or insufficient stock"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order or item not found")
    )
)]
pub async fn update_order_item(
    order_service: web::Data<OrderService>,
    user: CurrentUser,
    path: web::Path<(i64, i64)>,
    request: web::Json<UpdateOrderItemRequest>,
) -> Result<HttpResponse> {
    let (order_id, item_id) = path.into_inner();
    match order_service
        .update_order_item(Some(&user.0), order_id, item_id, request.into_inner())
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/orders/{id}/items/{item_id}",
    tag = "order",
    params(
        ("id" = i64, Path, description = "Order id"),
        ("item_id" = i64, Path, description = "Order item id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Item removed, total recomputed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order or item not found")
    )
)]
pub async fn delete_order_item(
    order_service: web::Data<OrderService>,
    user: CurrentUser,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (order_id, item_id) = path.into_inner();
    match order_service
        .delete_order_item(Some(&user.0), order_id, item_id)
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i64, Path, description = "Order id")),
    request_body = UpdateOrderRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Invalid update"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order(
    order_service: web::Data<OrderService>,
    user: CurrentUser,
    path: web::Path<i64>,
    request: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse> {
    match order_service
        .update_order(Some(&user.0), path.into_inner(), request.into_inner())
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "order",
    params(("id" = i64, Path, description = "Order id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Order and its items deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn delete_order(
    order_service: web::Data<OrderService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service
        .delete_order(Some(&user.0), path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(list_orders))
            .route("", web::post().to(create_order))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}", web::put().to(update_order))
            .route("/{id}", web::delete().to(delete_order))
            .route("/{id}/items", web::get().to(list_order_items))
            .route("/{id}/items", web::post().to(add_order_item))
            .route("/{id}/items/{item_id}", web::get().to(get_order_item))
            .route("/{id}/items/{item_id}", web::put().to(update_order_item))
            .route("/{id}/items/{item_id}", web::delete().to(delete_order_item)),
    );
}
