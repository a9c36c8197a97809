use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cooking_challenge")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub details: String,
    #[sea_orm(column_type = "Text")]
    pub rules: String,
    pub start_date: Date,
    pub end_date: Date,
    pub challenge_image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Client-writable challenge fields.
///
/// The aliases accept the form field names older frontends post.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeFields {
    #[serde(alias = "ChallengeTitle", alias = "challengeTitle")]
    pub title: String,
    #[serde(alias = "challengeDetails")]
    pub details: String,
    #[serde(alias = "Rules")]
    pub rules: String,
    pub start_date: Date,
    pub end_date: Date,
    #[serde(default)]
    pub challenge_image: Option<String>,
}

impl ChallengeFields {
    pub fn into_active_model(self, id: Uuid, challenge_image: Option<String>) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            title: Set(self.title),
            details: Set(self.details),
            rules: Set(self.rules),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            challenge_image: Set(challenge_image),
        }
    }
}

pub async fn create(
    db: &DatabaseConnection,
    fields: ChallengeFields,
    challenge_image: Option<String>,
) -> Result<Model, errors::ModelError> {
    let am = fields.into_active_model(Uuid::new_v4(), challenge_image);
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
