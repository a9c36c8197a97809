//! Lookup indexes for the per-parent listing endpoints.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_review_recipe_id")
                    .table(Review::Table)
                    .col(Review::RecipeId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reminder_user_id")
                    .table(Reminder::Table)
                    .col(Reminder::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_reminder_user_id").table(Reminder::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_review_recipe_id").table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Review { Table, RecipeId }

#[derive(DeriveIden)]
enum Reminder { Table, UserId }
