use crate::middlewares::get_current_identity;
use crate::models::*;
use crate::services::CouponService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/coupons",
    tag = "coupon",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Coupons ordered by code", body = PaginatedCouponResponse)
    )
)]
pub async fn list_coupons(
    coupon_service: web::Data<CouponService>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match coupon_service.list_coupons(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/coupons/{id}",
    tag = "coupon",
    params(("id" = i64, Path, description = "Coupon id")),
    responses(
        (status = 200, description = "Coupon", body = CouponResponse),
        (status = 404, description = "Coupon not found")
    )
)]
pub async fn get_coupon(
    coupon_service: web::Data<CouponService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match coupon_service.get_coupon(path.into_inner()).await {
        Ok(coupon) => Ok(HttpResponse::Ok().json(ApiResponse::success(coupon))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/coupons",
    tag = "coupon",
    request_body = CreateCouponRequest,
    responses(
        (status = 201, description = "Coupon created", body = CouponResponse),
        (status = 400, description = "Invalid or duplicate coupon")
    )
)]
pub async fn create_coupon(
    coupon_service: web::Data<CouponService>,
    req: HttpRequest,
    request: web::Json<CreateCouponRequest>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match coupon_service
        .create_coupon(identity.as_ref(), request.into_inner())
        .await
    {
        Ok(coupon) => Ok(HttpResponse::Created().json(ApiResponse::success(coupon))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/coupons/{id}",
    tag = "coupon",
    params(("id" = i64, Path, description = "Coupon id")),
    request_body = UpdateCouponRequest,
    responses(
        (status = 200, description = "Coupon updated", body = CouponResponse),
        (status = 400, description = "Invalid or duplicate coupon"),
        (status = 404, description = "Coupon not found")
    )
)]
pub async fn update_coupon(
    coupon_service: web::Data<CouponService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateCouponRequest>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match coupon_service
        .update_coupon(identity.as_ref(), path.into_inner(), request.into_inner())
        .await
    {
        Ok(coupon) => Ok(HttpResponse::Ok().json(ApiResponse::success(coupon))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/coupons/{id}",
    tag = "coupon",
    params(("id" = i64, Path, description = "Coupon id")),
    responses(
        (status = 204, description = "Coupon deleted"),
        (status = 404, description = "Coupon not found")
    )
)]
pub async fn delete_coupon(
    coupon_service: web::Data<CouponService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let identity = get_current_identity(&req);

    match coupon_service
        .delete_coupon(identity.as_ref(), path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/coupons/validate",
    tag = "coupon",
    request_body = ValidateCouponRequest,
    responses(
        (status = 200, description = "Coupon redeemed; discount computed", body = ValidateCouponResponse),
        (status = 400, description = "Coupon expired, inactive or used up"),
        (status = 404, description = "Coupon not found")
    )
)]
pub async fn validate_coupon(
    coupon_service: web::Data<CouponService>,
    request: web::Json<ValidateCouponRequest>,
) -> Result<HttpResponse> {
    match coupon_service.validate_coupon(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn coupon_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/coupons")
            .route("", web::get().to(list_coupons))
            .route("", web::post().to(create_coupon))
            .route("/validate", web::post().to(validate_coupon))
            .route("/{id}", web::get().to(get_coupon))
            .route("/{id}", web::put().to(update_coupon))
            .route("/{id}", web::delete().to(delete_coupon)),
    );
}
