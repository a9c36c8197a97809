//! Migrator registering one migration per table.
//! Lookup indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_recipe;
mod m20250101_000002_create_cooking_challenge;
mod m20250101_000003_create_review;
mod m20250101_000004_create_favorite;
mod m20250101_000005_create_reminder;
mod m20250101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_recipe::Migration),
            Box::new(m20250101_000002_create_cooking_challenge::Migration),
            Box::new(m20250101_000003_create_review::Migration),
            Box::new(m20250101_000004_create_favorite::Migration),
            Box::new(m20250101_000005_create_reminder::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000006_add_indexes::Migration),
        ]
    }
}
