use crate::middlewares::CurrentUser;
use crate::models::*;
use crate::services::UserService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/users",
    tag = "user",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Users", body = PaginatedUserResponse)
    )
)]
pub async fn list_users(
    user_service: web::Data<UserService>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match user_service.list_users(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "user",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The authenticated caller", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_me(user: CurrentUser) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(&user.0))))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "user",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    user_service: web::Data<UserService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match user_service.get_user(path.into_inner()).await {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(user))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("/me", web::get().to(get_me))
            .route("/{id}", web::get().to(get_user)),
    );
}
