//! Create `recipe` table.
//!
//! `recipe_image` holds the generated name of a file in the recipe upload directory.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipe::Table)
                    .if_not_exists()
                    .col(uuid(Recipe::Id).primary_key())
                    .col(text(Recipe::Title).not_null())
                    .col(text(Recipe::Description).not_null())
                    .col(text(Recipe::Ingredients).not_null())
                    .col(text(Recipe::Steps).not_null())
                    .col(text(Recipe::Time).not_null())
                    .col(text(Recipe::RecipeType).not_null())
                    .col(text(Recipe::Category).not_null())
                    .col(string_len_null(Recipe::RecipeImage, 512))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Recipe::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Recipe {
    Table,
    Id,
    Title,
    Description,
    Ingredients,
    Steps,
    Time,
    RecipeType,
    Category,
    RecipeImage,
}
