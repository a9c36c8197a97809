//! Create `cooking_challenge` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CookingChallenge::Table)
                    .if_not_exists()
                    .col(uuid(CookingChallenge::Id).primary_key())
                    .col(text(CookingChallenge::Title).not_null())
                    .col(text(CookingChallenge::Details).not_null())
                    .col(text(CookingChallenge::Rules).not_null())
                    .col(date(CookingChallenge::StartDate).not_null())
                    .col(date(CookingChallenge::EndDate).not_null())
                    .col(string_len_null(CookingChallenge::ChallengeImage, 512))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CookingChallenge::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CookingChallenge {
    Table,
    Id,
    Title,
    Details,
    Rules,
    StartDate,
    EndDate,
    ChallengeImage,
}
