#![allow(dead_code)]

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use storefront_backend::config::AccessConfig;
use storefront_backend::models::*;
use storefront_backend::services::*;
use storefront_backend::utils::JwtService;
use tempfile::TempDir;

pub const JWT_SECRET: &str = "test-secret";

/// Services over a throwaway, fully migrated SQLite database.
pub struct TestContext {
    pub pool: DatabaseConnection,
    pub jwt: JwtService,
    pub users: UserService,
    pub catalog: CatalogService,
    pub addresses: AddressService,
    pub orders: OrderService,
    pub reviews: ReviewService,
    pub coupons: CouponService,
    pub wishlists: WishlistService,
    _dir: TempDir,
}

pub async fn setup() -> TestContext {
    setup_with(AccessConfig::default()).await
}

pub async fn setup_with(access: AccessConfig) -> TestContext {
    build(access, 1).await
}

/// A pool with several connections, so spawned tasks really hit the
/// database at the same time.
pub async fn setup_concurrent() -> TestContext {
    build(AccessConfig::default(), 8).await
}

async fn build(access: AccessConfig, connections: u32) -> TestContext {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(connections)
        .min_connections(connections)
        .sqlx_logging(false);
    let pool = Database::connect(options).await.unwrap();
    Migrator::up(&pool, None).await.unwrap();

    let policy = AccessPolicy::new(&access);
    TestContext {
        jwt: JwtService::new(JWT_SECRET, 3600),
        users: UserService::new(pool.clone()),
        catalog: CatalogService::new(pool.clone(), policy.clone()),
        addresses: AddressService::new(pool.clone(), policy.clone()),
        orders: OrderService::new(pool.clone(), policy.clone()),
        reviews: ReviewService::new(pool.clone(), policy.clone()),
        coupons: CouponService::new(pool.clone(), policy.clone()),
        wishlists: WishlistService::new(pool.clone(), policy),
        pool,
        _dir: dir,
    }
}

pub fn customer(id: i64) -> Identity {
    Identity {
        id,
        username: format!("customer{id}"),
        email: format!("customer{id}@example.com"),
        is_staff: false,
    }
}

pub fn staff(id: i64) -> Identity {
    Identity {
        username: format!("staff{id}"),
        email: format!("staff{id}@example.com"),
        is_staff: true,
        ..customer(id)
    }
}

impl TestContext {
    /// Mirrors the identity the way the auth middleware does.
    pub async fn register(&self, identity: Identity) -> Identity {
        self.users.sync_identity(&identity).await.unwrap();
        identity
    }

    pub fn token_for(&self, identity: &Identity) -> String {
        self.jwt.generate_access_token(identity).unwrap()
    }

    pub async fn category(&self, name: &str) -> CategoryResponse {
        self.catalog
            .create_category(
                None,
                CategoryRequest {
                    name: name.to_string(),
                },
            )
            .await
            .unwrap()
    }

    pub async fn product(&self, name: &str, price: i64, stock: i32) -> ProductResponse {
        self.catalog
            .create_product(
                None,
                CreateProductRequest {
                    name: name.to_string(),
                    description: None,
                    price,
                    stock,
                    main_image_url: None,
                    variations: None,
                    category_id: None,
                },
            )
            .await
            .unwrap()
    }

    pub async fn coupon(
        &self,
        code: &str,
        discount_type: DiscountType,
        value: i64,
        usage_limit: Option<i32>,
    ) -> CouponResponse {
        self.coupons
            .create_coupon(
                None,
                CreateCouponRequest {
                    code: code.to_string(),
                    discount_type,
                    discount_value: value,
                    expiration_date: None,
                    is_active: Some(true),
                    usage_limit,
                },
            )
            .await
            .unwrap()
    }
}

pub fn order_request(items: &[(i64, i32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        order_number: None,
        items: items
            .iter()
            .map(|&(product_id, quantity)| OrderItemRequest {
                product_id,
                quantity,
            })
            .collect(),
        shipping_address_id: None,
        payment_method: "credit_card".to_string(),
        shipping_cost: 0,
    }
}

pub fn address_request(street: &str, is_default: bool) -> CreateAddressRequest {
    CreateAddressRequest {
        street: street.to_string(),
        number: "123".to_string(),
        complement: None,
        neighborhood: "Centro".to_string(),
        city: "Curitiba".to_string(),
        state: "PR".to_string(),
        zip_code: "80010-000".to_string(),
        is_default,
    }
}
