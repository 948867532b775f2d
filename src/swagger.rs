use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::user::list_users,
        handlers::user::get_me,
        handlers::user::get_user,
        handlers::category::list_categories,
        handlers::category::get_category,
        handlers::category::create_category,
        handlers::category::update_category,
        handlers::category::delete_category,
        handlers::product::list_products,
        handlers::product::get_product,
        handlers::product::create_product,
        handlers::product::update_product,
        handlers::product::delete_product,
        handlers::product::add_to_wishlist,
        handlers::product::remove_from_wishlist,
        handlers::address::list_addresses,
        handlers::address::get_address,
        handlers::address::create_address,
        handlers::address::update_address,
        handlers::address::delete_address,
        handlers::order::list_orders,
        handlers::order::get_order,
        handlers::order::create_order,
        handlers::order::add_order_item,
        handlers::order::list_order_items,
        handlers::order::get_order_item,
        handlers::order::update_order_item,
        handlers::order::delete_order_item,
        handlers::order::update_order,
        handlers::order::delete_order,
        handlers::review::list_reviews,
        handlers::review::get_review,
        handlers::review::create_review,
        handlers::review::update_review,
        handlers::review::delete_review,
        handlers::coupon::list_coupons,
        handlers::coupon::get_coupon,
        handlers::coupon::create_coupon,
        handlers::coupon::update_coupon,
        handlers::coupon::delete_coupon,
        handlers::coupon::validate_coupon,
        handlers::wishlist::list_wishlists,
        handlers::wishlist::get_wishlist,
        handlers::wishlist::create_wishlist,
        handlers::wishlist::update_wishlist,
        handlers::wishlist::delete_wishlist,
    ),
    components(
        schemas(
            ApiError,
            PaginationInfo,
            UserResponse,
            CategoryResponse,
            CategoryRequest,
            ProductResponse,
            CreateProductRequest,
            UpdateProductRequest,
            AddressResponse,
            CreateAddressRequest,
            UpdateAddressRequest,
            OrderStatus,
            OrderResponse,
            OrderItemResponse,
            OrderItemRequest,
            UpdateOrderItemRequest,
            CreateOrderRequest,
            UpdateOrderRequest,
            ReviewResponse,
            CreateReviewRequest,
            UpdateReviewRequest,
            DiscountType,
            CouponResponse,
            CreateCouponRequest,
            UpdateCouponRequest,
            ValidateCouponRequest,
            ValidateCouponResponse,
            WishlistResponse,
            WishlistEntryResponse,
            WishlistAddResponse,
            WishlistRemoveResponse,
            PaginatedUserResponse,
            PaginatedCategoryResponse,
            PaginatedProductResponse,
            PaginatedAddressResponse,
            PaginatedOrderResponse,
            PaginatedReviewResponse,
            PaginatedCouponResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "user", description = "Identity mirror API"),
        (name = "catalog", description = "Categories and products API"),
        (name = "address", description = "Shipping address API"),
        (name = "order", description = "Order management API"),
        (name = "review", description = "Product review API"),
        (name = "coupon", description = "Discount coupon API"),
        (name = "wishlist", description = "Wishlist API"),
    ),
    info(
        title = "Storefront Backend API",
        version = "1.0.0",
        description = "Storefront REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
