use crate::middlewares::get_current_identity;
use crate::models::*;
use crate::services::CatalogService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/categories",
    tag = "catalog",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Categories ordered by name", body = PaginatedCategoryResponse)
    )
)]
pub async fn list_categories(
    catalog_service: web::Data<CatalogService>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match catalog_service.list_categories(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match catalog_service.get_category(path.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Ok().json(ApiResponse::success(category))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = "catalog",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid or duplicate name")
    )
)]
pub async fn create_category(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    request: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match catalog_service
        .create_category(identity.as_ref(), request.into_inner())
        .await
    {
        Ok(category) => Ok(HttpResponse::Created().json(ApiResponse::success(category))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid or duplicate name"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match catalog_service
        .update_category(identity.as_ref(), path.into_inner(), request.into_inner())
        .await
    {
        Ok(category) => Ok(HttpResponse::Ok().json(ApiResponse::success(category))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match catalog_service
        .delete_category(identity.as_ref(), path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn category_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/{id}", web::get().to(get_category))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
}
