use crate::middlewares::{CurrentUser, get_current_identity};
use crate::models::*;
use crate::services::ReviewService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/reviews",
    tag = "review",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
        ("product_id" = Option<i64>, Query, description = "Only reviews of this product")
    ),
    responses(
        (status = 200, description = "Reviews, newest first", body = PaginatedReviewResponse)
    )
)]
pub async fn list_reviews(
    review_service: web::Data<ReviewService>,
    query: web::Query<ReviewQuery>,
) -> Result<HttpResponse> {
    match review_service.list_reviews(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "review",
    params(("id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review", body = ReviewResponse),
        (status = 404, description = "Review not found")
    )
)]
pub async fn get_review(
    review_service: web::Data<ReviewService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match review_service.get_review(path.into_inner()).await {
        Ok(review) => Ok(HttpResponse::Ok().json(ApiResponse::success(review))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "review",
    request_body = CreateReviewRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Rating out of range or product already reviewed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn create_review(
    review_service: web::Data<ReviewService>,
    user: CurrentUser,
    request: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse> {
    match review_service
        .create_review(Some(&user.0), request.into_inner())
        .await
    {
        Ok(review) => Ok(HttpResponse::Created().json(ApiResponse::success(review))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "review",
    params(("id" = i64, Path, description = "Review id")),
    request_body = UpdateReviewRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 400, description = "Rating out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    review_service: web::Data<ReviewService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateReviewRequest>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match review_service
        .update_review(identity.as_ref(), path.into_inner(), request.into_inner())
        .await
    {
        Ok(review) => Ok(HttpResponse::Ok().json(ApiResponse::success(review))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "review",
    params(("id" = i64, Path, description = "Review id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    review_service: web::Data<ReviewService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match review_service
        .delete_review(identity.as_ref(), path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn review_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .route("", web::get().to(list_reviews))
            .route("", web::post().to(create_review))
            .route("/{id}", web::get().to(get_review))
            .route("/{id}", web::put().to(update_review))
            .route("/{id}", web::delete().to(delete_review)),
    );
}
