//! Create `favorite` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Favorite::Table)
                    .if_not_exists()
                    .col(uuid(Favorite::Id).primary_key())
                    .col(text(Favorite::RecipeName).not_null())
                    .col(timestamp_with_time_zone_null(Favorite::ReminderDateTime))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Favorite::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Favorite { Table, Id, RecipeName, ReminderDateTime }
