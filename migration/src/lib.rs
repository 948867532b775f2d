pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_users_and_catalog;
mod m20261001_000002_create_commerce;
mod m20261001_000003_create_social;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_users_and_catalog::Migration),
            Box::new(m20261001_000002_create_commerce::Migration),
            Box::new(m20261001_000003_create_social::Migration),
        ]
    }
}
