use crate::middlewares::CurrentUser;
use crate::models::*;
use crate::services::AddressService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/addresses",
    tag = "address",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's addresses", body = PaginatedAddressResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_addresses(
    address_service: web::Data<AddressService>,
    user: CurrentUser,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match address_service.list_addresses(Some(&user.0), &query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/addresses/{id}",
    tag = "address",
    params(("id" = i64, Path, description = "Address id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Address", body = AddressResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Address not found")
    )
)]
pub async fn get_address(
    address_service: web::Data<AddressService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match address_service
        .get_address(Some(&user.0), path.into_inner())
        .await
    {
        Ok(address) => Ok(HttpResponse::Ok().json(ApiResponse::success(address))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/addresses",
    tag = "address",
    request_body = CreateAddressRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Address created", body = AddressResponse),
        (status = 400, description = "Invalid address"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_address(
    address_service: web::Data<AddressService>,
    user: CurrentUser,
    request: web::Json<CreateAddressRequest>,
) -> Result<HttpResponse> {
    match address_service
        .create_address(Some(&user.0), request.into_inner())
        .await
    {
        Ok(address) => Ok(HttpResponse::Created().json(ApiResponse::success(address))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/addresses/{id}",
    tag = "address",
    params(("id" = i64, Path, description = "Address id")),
    request_body = UpdateAddressRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Address updated", body = AddressResponse),
        (status = 400, description = "Invalid address"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Address not found")
    )
)]
pub async fn update_address(
    address_service: web::Data<AddressService>,
    user: CurrentUser,
    path: web::Path<i64>,
    request: web::Json<UpdateAddressRequest>,
) -> Result<HttpResponse> {
    match address_service
        .update_address(Some(&user.0), path.into_inner(), request.into_inner())
        .await
    {
        Ok(address) => Ok(HttpResponse::Ok().json(ApiResponse::success(address))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/addresses/{id}",
    tag = "address",
    params(("id" = i64, Path, description = "Address id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Address deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Address not found")
    )
)]
pub async fn delete_address(
    address_service: web::Data<AddressService>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match address_service
        .delete_address(Some(&user.0), path.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn address_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/addresses")
            .route("", web::get().to(list_addresses))
            .route("", web::post().to(create_address))
            .route("/{id}", web::get().to(get_address))
            .route("/{id}", web::put().to(update_address))
            .route("/{id}", web::delete().to(delete_address)),
    );
}
