//! Create `reminder` table.
//!
//! `user_id` and `challenge_id` are opaque references without foreign keys.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reminder::Table)
                    .if_not_exists()
                    .col(uuid(Reminder::Id).primary_key())
                    .col(text(Reminder::UserId).not_null())
                    .col(text(Reminder::ChallengeId).not_null())
                    .col(timestamp_with_time_zone(Reminder::RemindAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reminder::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reminder { Table, Id, UserId, ChallengeId, RemindAt }
