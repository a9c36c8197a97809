//! Create `review` table.
//!
//! `recipe_id` is an opaque reference; no foreign key is declared.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(uuid(Review::Id).primary_key())
                    .col(text(Review::RecipeId).not_null())
                    .col(text(Review::ReviewerName).not_null())
                    .col(integer(Review::Rating).not_null())
                    .col(text(Review::ReviewText).not_null())
                    .col(timestamp_with_time_zone(Review::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Review::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Review {
    Table,
    Id,
    RecipeId,
    ReviewerName,
    Rating,
    ReviewText,
    CreatedAt,
    UpdatedAt,
}
