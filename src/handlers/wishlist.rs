use crate::middlewares::CurrentUser;
use crate::models::*;
use crate::services::WishlistService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/wishlists",
    tag = "wishlist",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's wishlist, if any", body = [WishlistResponse]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_wishlists(
    wishlist_service: web::Data<WishlistService>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    match wishlist_service.list_wishlists(Some(&user.0)).await {
        Ok(wishlists) => Ok(HttpResponse::Ok().json(ApiResponse::success(wishlists))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/wishlists/{id}",
    tag = "wishlist",
    params(("id" = i64, Path, description = "Wishlist id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Wishlist with product snapshots", body = WishlistResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Wishlist not found")
    )
)]
pub async fn get_wishlist(
    wishlist_service: web::Data<WishlistService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match wishlist_service
        .get_wishlist(Some(&user.0), path.into_inner())
        .await
    {
        Ok(wishlist) => Ok(HttpResponse::Ok().json(ApiResponse::success(wishlist))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/wishlists",
    tag = "wishlist",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Wishlist created", body = WishlistResponse),
        (status = 400, description = "The caller already has a wishlist"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_wishlist(
    wishlist_service: web::Data<WishlistService>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    match wishlist_service.create_wishlist(Some(&user.0)).await {
        Ok(wishlist) => Ok(HttpResponse::Created().json(ApiResponse::success(wishlist))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/wishlists/{id}",
    tag = "wishlist",
    params(("id" = i64, Path, description = "Wishlist id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Wishlist touched", body = WishlistResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Wishlist not found")
    )
)]
pub async fn update_wishlist(
    wishlist_service: web::Data<WishlistService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match wishlist_service
        .update_wishlist(Some(&user.0), path.into_inner())
        .await
    {
        Ok(wishlist) => Ok(HttpResponse::Ok().json(ApiResponse::success(wishlist))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/wishlists/{id}",
    tag = "wishlist",
    params(("id" = i64, Path, description = "Wishlist id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Wishlist and its entries deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Wishlist not found")
    )
)]
pub async fn delete_wishlist(
    wishlist_service: web::Data<WishlistService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match wishlist_service
        .delete_wishlist(Some(&user.0), path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn wishlist_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wishlists")
            .route("", web::get().to(list_wishlists))
            .route("", web::post().to(create_wishlist))
            .route("/{id}", web::get().to(get_wishlist))
            .route("/{id}", web::put().to(update_wishlist))
            .route("/{id}", web::delete().to(delete_wishlist)),
    );
}
