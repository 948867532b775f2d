use crate::middlewares::{CurrentUser, get_current_identity};
use crate::models::*;
use crate::services::{CatalogService, WishlistService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/products",
    tag = "catalog",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
        ("category_id" = Option<i64>, Query, description = "Only products of this category")
    ),
    responses(
        (status = 200, description = "Products ordered by name", body = PaginatedProductResponse)
    )
)]
pub async fn list_products(
    catalog_service: web::Data<CatalogService>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse> {
    match catalog_service.list_products(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with its category", body = ProductResponse),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match catalog_service.get_product(path.into_inner()).await {
        Ok(product) => Ok(HttpResponse::Ok().json(ApiResponse::success(product))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "catalog",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn create_product(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match catalog_service
        .create_product(identity.as_ref(), request.into_inner())
        .await
    {
        Ok(product) => Ok(HttpResponse::Created().json(ApiResponse::success(product))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid product"),
        (status = 404, description = "Product or category not found")
    )
)]
pub async fn update_product(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match catalog_service
        .update_product(identity.as_ref(), path.into_inner(), request.into_inner())
        .await
    {
        Ok(product) => Ok(HttpResponse::Ok().json(ApiResponse::success(product))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match catalog_service
        .delete_product(identity.as_ref(), path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/products/{id}/add_to_wishlist",
    tag = "wishlist",
    params(("id" = i64, Path, description = "Product id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Product added to the wishlist", body = WishlistAddResponse),
        (status = 200, description = "Product was already on the wishlist", body = WishlistAddResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_to_wishlist(
    wishlist_service: web::Data<WishlistService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match wishlist_service
        .add_to_wishlist(Some(&user.0), path.into_inner())
        .await
    {
        Ok(response) if response.created => {
            Ok(HttpResponse::Created().json(ApiResponse::success(response)))
        }
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/products/{id}/remove_from_wishlist",
    tag = "wishlist",
    params(("id" = i64, Path, description = "Product id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Product removed from the wishlist"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No wishlist, or product not on it")
    )
)]
pub async fn remove_from_wishlist(
    wishlist_service: web::Data<WishlistService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match wishlist_service
        .remove_from_wishlist(Some(&user.0), path.into_inner())
        .await
    {
        Ok(_) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn product_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product))
            .route("/{id}/add_to_wishlist", web::post().to(add_to_wishlist))
            .route(
                "/{id}/remove_from_wishlist",
                web::post().to(remove_from_wishlist),
            ),
    );
}
